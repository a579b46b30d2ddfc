//! 领域规则层
//!
//! 平台所有可变操作的纯决策逻辑：选课容量、作业生命周期、提交状态机、
//! 评分与发布，以及贯穿全部操作的授权决策表。
//!
//! 本层不做任何 I/O：每个函数接收存储层在调用前取出的实体快照和注入的
//! 当前时间，返回"草稿"（待持久化的新状态描述）或命名的拒绝原因。
//! 调用方（services 层）负责把一次决策和随后的写入包在同一个数据库
//! 事务里；并发竞争由存储层的唯一约束兜底（见 storage 模块）。
//!
//! 对合法输入本层是全函数：要么成功要么返回 [`Rejection`]，不会 panic。

pub mod assignments;
pub mod authorization;
pub mod enrollment;
pub mod grading;
pub mod submissions;

pub use authorization::{Action, Actor, authorize};

/// 命名的拒绝原因
///
/// HTTP 层按 [`RejectionKind`] 映射状态码，按具体变体映射业务错误码，
/// 因此这里绝不使用非结构化的错误字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    // 授权
    Forbidden,
    // 引用的实体不存在（或已被软删除，对本层等价于不存在）
    NotFound,
    // 选课
    CapacityExceeded,
    AlreadyEnrolled,
    NotEnrolled,
    // 作业
    DueDateNotInFuture,
    MaxScoreOutOfRange,
    AssignmentHasSubmissions,
    // 提交
    AlreadySubmitted,
    SubmissionClosed,
    ResubmissionNotAllowed,
    CannotResubmitGradedWork,
    CannotDeleteGradedSubmission,
    // 评分
    AlreadyGraded,
    ScoreOutOfRange,
    GradeAlreadyPublished,
}

/// 拒绝类别，对应 HTTP 层的状态码族
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Forbidden,
    NotFound,
    Conflict,
    Invalid,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::Forbidden => RejectionKind::Forbidden,
            Rejection::NotFound => RejectionKind::NotFound,
            Rejection::CapacityExceeded
            | Rejection::AlreadyEnrolled
            | Rejection::NotEnrolled
            | Rejection::AssignmentHasSubmissions
            | Rejection::AlreadySubmitted
            | Rejection::SubmissionClosed
            | Rejection::ResubmissionNotAllowed
            | Rejection::CannotResubmitGradedWork
            | Rejection::CannotDeleteGradedSubmission
            | Rejection::AlreadyGraded
            | Rejection::GradeAlreadyPublished => RejectionKind::Conflict,
            Rejection::DueDateNotInFuture
            | Rejection::MaxScoreOutOfRange
            | Rejection::ScoreOutOfRange => RejectionKind::Invalid,
        }
    }
}

/// 决策结果：成功携带草稿，失败携带命名拒绝
pub type Decision<T> = Result<T, Rejection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_kind_mapping() {
        assert_eq!(Rejection::Forbidden.kind(), RejectionKind::Forbidden);
        assert_eq!(Rejection::NotFound.kind(), RejectionKind::NotFound);
        assert_eq!(Rejection::CapacityExceeded.kind(), RejectionKind::Conflict);
        assert_eq!(Rejection::AlreadyGraded.kind(), RejectionKind::Conflict);
        assert_eq!(Rejection::DueDateNotInFuture.kind(), RejectionKind::Invalid);
        assert_eq!(Rejection::ScoreOutOfRange.kind(), RejectionKind::Invalid);
    }
}
