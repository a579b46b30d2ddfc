use super::entities::Class;
use crate::models::common::pagination::PaginationInfo;
use serde::Serialize;

// 教学班列表响应
#[derive(Debug, Serialize)]
pub struct ClassListResponse {
    pub items: Vec<Class>,
    pub pagination: PaginationInfo,
}

// 教学班详情响应，附带当前活跃选课数
#[derive(Debug, Serialize)]
pub struct ClassDetailResponse {
    #[serde(flatten)]
    pub class: Class,
    pub active_enrollments: i64,
}
