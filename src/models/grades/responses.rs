use serde::Serialize;

use super::entities::Grade;
use crate::models::common::pagination::PaginationInfo;

// 评分列表响应
#[derive(Debug, Serialize)]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

// 批量发布结果清单：每个评分 ID 单独上报结果，部分失败不影响其他条目
#[derive(Debug, Serialize)]
pub struct PublishManifestResponse {
    pub results: Vec<PublishManifestEntry>,
    pub published: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct PublishManifestEntry {
    pub grade_id: i64,
    pub outcome: String,
}
