use super::entities::SubmissionStatus;
use serde::Deserialize;

// 创建提交请求，file_token 来自先行的文件上传
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub file_token: String,
}

// 重交请求
#[derive(Debug, Deserialize)]
pub struct ResubmitRequest {
    pub file_token: String,
}

// 提交列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}
