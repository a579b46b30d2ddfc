use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 教学班ID
    pub id: i64,
    // 所属课程ID
    pub course_id: i64,
    // 授课教师ID，创建后不可变更
    pub instructor_id: i64,
    // 学期标签，如 "2026-spring"
    pub semester: String,
    // 容量上限，活跃选课数不得超过该值
    pub max_capacity: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
