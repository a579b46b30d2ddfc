use super::entities::AssignmentKind;
use serde::Deserialize;

// 作业创建请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: AssignmentKind,
    pub max_score: i32,
    pub due_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub allow_late_submission: bool,
    #[serde(default)]
    pub allow_resubmission: bool,
}

fn default_kind() -> AssignmentKind {
    AssignmentKind::Individual
}

// 作业更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<i32>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub allow_late_submission: Option<bool>,
    pub allow_resubmission: Option<bool>,
}

// 作业删除查询参数
#[derive(Debug, Deserialize)]
pub struct DeleteAssignmentQuery {
    /// 存在提交时是否级联删除，默认 false（拒绝删除）
    #[serde(default)]
    pub cascade: bool,
}

// 作业列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
}
