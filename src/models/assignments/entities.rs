use serde::{Deserialize, Serialize};

// 作业类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    Individual, // 个人作业
    Group,      // 小组作业
}

impl<'de> Deserialize<'de> for AssignmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "individual" => Ok(AssignmentKind::Individual),
            "group" => Ok(AssignmentKind::Group),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业类型: '{s}'. 支持的类型: individual, group"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentKind::Individual => write!(f, "individual"),
            AssignmentKind::Group => write!(f, "group"),
        }
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(AssignmentKind::Individual),
            "group" => Ok(AssignmentKind::Group),
            _ => Err(format!("Invalid assignment kind: {s}")),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的教学班 ID
    pub class_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 作业类型
    pub kind: AssignmentKind,
    // 作业最高分数
    pub max_score: i32,
    // 作业截止时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 是否允许迟交
    pub allow_late_submission: bool,
    // 是否允许重交
    pub allow_resubmission: bool,
    // 创建者 ID（即授课教师，创建后不可变更）
    pub created_by: i64,
    // 作业创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 作业更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
