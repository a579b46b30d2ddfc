use serde::{Deserialize, Serialize};

// 评分实体，与提交一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub submission_id: i64,
    // 评分人（授课教师）
    pub grader_id: i64,
    // 平台统一 0-100 分制
    pub score: i32,
    pub feedback: Option<String>,
    // 发布是单向转换：发布后学生可见，且不可再修改
    pub is_published: bool,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
