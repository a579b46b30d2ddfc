use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程代码，全局唯一
    pub code: String,
    // 课程名称
    pub title: String,
    // 开课院系
    pub department: String,
    // 学分
    pub credit_hours: i32,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
