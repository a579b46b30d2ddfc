use serde::{Deserialize, Serialize};

// 选课记录
//
// 每个 (student_id, class_id) 至多一条记录；退课只翻转 is_active，
// 重新选课复用同一条记录，历史不丢失。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    pub is_active: bool,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
