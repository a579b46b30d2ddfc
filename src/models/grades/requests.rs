use serde::Deserialize;

// 创建评分请求
#[derive(Debug, Deserialize)]
pub struct CreateGradeRequest {
    pub submission_id: i64,
    pub score: i32,
    pub feedback: Option<String>,
    /// 创建后立即发布
    #[serde(default)]
    pub publish: bool,
}

// 更新评分请求（仅未发布的评分可更新）
#[derive(Debug, Deserialize)]
pub struct UpdateGradeRequest {
    pub score: Option<i32>,
    pub feedback: Option<String>,
}

// 批量发布请求
#[derive(Debug, Deserialize)]
pub struct PublishGradesRequest {
    pub grade_ids: Vec<i64>,
}

// 评分列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub published: Option<bool>,
}
