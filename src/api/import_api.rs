// ==========================================
// 奶牛场生产管理系统 - 导入 API
// ==========================================
// 职责: 封装导入器, 提供文件导入接口
// 架构: API 层 → 导入层 → Repository 层
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::milk::ImportResult;
use crate::importer::record_importer::MilkRecordImporter;
use crate::repository::milk_record_repo::MilkRecordRepository;

// ==========================================
// ImportApi - 导入 API
// ==========================================
pub struct ImportApi {
    importer: MilkRecordImporter,
}

impl ImportApi {
    /// 创建新的 ImportApi 实例
    pub fn new(record_repo: Arc<MilkRecordRepository>) -> Self {
        Self {
            importer: MilkRecordImporter::new(record_repo),
        }
    }

    /// 从文件导入产奶记录（CSV / Excel）
    ///
    /// # 返回
    /// - Ok(ImportResult): 批次统计（含逐行错误清单）
    /// - Err(ApiError::ImportError): 文件级失败
    pub fn import_milk_records(&self, file_path: &str) -> ApiResult<ImportResult> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }

        self.importer
            .import_file(Path::new(file_path))
            .map_err(|e| ApiError::ImportError(e.to_string()))
    }
}
