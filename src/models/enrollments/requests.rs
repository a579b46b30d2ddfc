use serde::Deserialize;

// 选课名册查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct RosterQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 是否只列出活跃选课，默认 true
    pub active_only: Option<bool>,
}
