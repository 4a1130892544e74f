// ==========================================
// 奶牛场生产管理系统 - 导入层
// ==========================================
// 职责: 外部文件数据进入系统的唯一入口
// 管道: 文件解析 → 字段映射 → 行校验 → 批量入库
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_importer;

// 重导出核心类型
pub use error::ImportError;
pub use field_mapper::FieldMapper;
pub use file_parser::{parse_file, CsvParser, ExcelParser, FileParser};
pub use record_importer::MilkRecordImporter;
