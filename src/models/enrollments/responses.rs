use super::entities::Enrollment;
use crate::models::common::pagination::PaginationInfo;
use serde::Serialize;

// 名册列表项
#[derive(Debug, Serialize)]
pub struct RosterItem {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub username: String,
    pub display_name: Option<String>,
}

// 名册响应
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub items: Vec<RosterItem>,
    pub pagination: PaginationInfo,
}
