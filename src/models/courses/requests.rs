use serde::Deserialize;

// 课程创建请求
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub department: String,
    pub credit_hours: i32,
}

// 课程更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub department: Option<String>,
    pub credit_hours: Option<i32>,
}

// 课程列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department: Option<String>,
    pub search: Option<String>,
}
