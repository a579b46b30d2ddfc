use serde::Deserialize;

// 教学班创建请求
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub course_id: i64,
    pub instructor_id: i64,
    pub semester: String,
    pub max_capacity: i64,
}

// 教学班更新请求，授课教师不可变更
#[derive(Debug, Deserialize)]
pub struct UpdateClassRequest {
    pub semester: Option<String>,
    pub max_capacity: Option<i64>,
}

// 教学班列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub semester: Option<String>,
}
