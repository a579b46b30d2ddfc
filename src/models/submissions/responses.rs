use serde::Serialize;

use super::entities::Submission;
use crate::models::common::pagination::PaginationInfo;

/// 提交者信息
#[derive(Debug, Serialize)]
pub struct SubmissionStudent {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
}

/// 提交中的评分信息（仅已发布的评分对学生可见）
#[derive(Debug, Serialize)]
pub struct SubmissionGradeInfo {
    pub score: i32,
    pub feedback: Option<String>,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

/// 提交详情响应
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: Submission,
    pub grade: Option<SubmissionGradeInfo>,
}

/// 提交列表项（教师视角，含提交者信息）
#[derive(Debug, Serialize)]
pub struct SubmissionListItem {
    #[serde(flatten)]
    pub submission: Submission,
    pub student: SubmissionStudent,
    pub graded: bool,
}

/// 提交列表响应
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}
