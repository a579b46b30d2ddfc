//! 作业生命周期规则
//!
//! 创建/更新/删除都要求操作者是教学班的授课教师；截止时间必须严格在
//! 未来，满分必须落在平台上限内。这些是调用方必须当作拒绝处理的硬校验，
//! 不是服务器错误。

use chrono::{DateTime, Utc};

use super::authorization::{Action, Actor, authorize};
use super::{Decision, Rejection};
use crate::models::assignments::entities::{Assignment, AssignmentKind};
use crate::models::classes::entities::Class;

/// 作业满分上限
pub const MAX_SCORE_LIMIT: i32 = 1000;

/// 新作业的内容描述
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSpec {
    pub title: String,
    pub description: Option<String>,
    pub kind: AssignmentKind,
    pub max_score: i32,
    pub due_date: DateTime<Utc>,
    pub allow_late_submission: bool,
    pub allow_resubmission: bool,
}

/// 创建草稿：校验通过后待持久化的作业
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDraft {
    pub class_id: i64,
    pub created_by: i64,
    pub spec: AssignmentSpec,
    pub created_at: DateTime<Utc>,
}

/// 更新请求中出现的字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub allow_late_submission: Option<bool>,
    pub allow_resubmission: Option<bool>,
}

/// 删除模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// 无提交，直接删除
    Plain,
    /// 显式级联：连同既有提交（及其评分）一并删除
    CascadeSubmissions,
}

fn check_max_score(max_score: i32) -> Decision<()> {
    if max_score <= 0 || max_score > MAX_SCORE_LIMIT {
        return Err(Rejection::MaxScoreOutOfRange);
    }
    Ok(())
}

fn check_due_date(due_date: DateTime<Utc>, now: DateTime<Utc>) -> Decision<()> {
    // 严格在未来，等于当前时刻也拒绝
    if due_date <= now {
        return Err(Rejection::DueDateNotInFuture);
    }
    Ok(())
}

/// 创建作业
pub fn create(
    actor: &Actor,
    class: &Class,
    spec: AssignmentSpec,
    now: DateTime<Utc>,
) -> Decision<AssignmentDraft> {
    authorize(actor, &Action::ManageAssignments { class })?;
    check_due_date(spec.due_date, now)?;
    check_max_score(spec.max_score)?;

    Ok(AssignmentDraft {
        class_id: class.id,
        created_by: actor.id,
        spec,
        created_at: now,
    })
}

/// 更新作业，出现的字段沿用与创建相同的校验
pub fn update(
    actor: &Actor,
    class: &Class,
    _assignment: &Assignment,
    changes: AssignmentChanges,
    now: DateTime<Utc>,
) -> Decision<AssignmentChanges> {
    authorize(actor, &Action::ManageAssignments { class })?;
    if let Some(due_date) = changes.due_date {
        check_due_date(due_date, now)?;
    }
    if let Some(max_score) = changes.max_score {
        check_max_score(max_score)?;
    }
    Ok(changes)
}

/// 删除作业
///
/// 默认存在有效提交时拒绝删除；调用方显式传入 `cascade` 才级联。
pub fn delete(
    actor: &Actor,
    class: &Class,
    _assignment: &Assignment,
    live_submissions: i64,
    cascade: bool,
) -> Decision<DeleteMode> {
    authorize(actor, &Action::ManageAssignments { class })?;

    if live_submissions > 0 {
        if !cascade {
            return Err(Rejection::AssignmentHasSubmissions);
        }
        return Ok(DeleteMode::CascadeSubmissions);
    }
    Ok(DeleteMode::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn class(instructor_id: i64) -> Class {
        Class {
            id: 1,
            course_id: 1,
            instructor_id,
            semester: "2026-spring".into(),
            max_capacity: 30,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn spec(max_score: i32, due: DateTime<Utc>) -> AssignmentSpec {
        AssignmentSpec {
            title: "hw1".into(),
            description: None,
            kind: AssignmentKind::Individual,
            max_score,
            due_date: due,
            allow_late_submission: false,
            allow_resubmission: false,
        }
    }

    fn assignment() -> Assignment {
        Assignment {
            id: 1,
            class_id: 1,
            title: "hw1".into(),
            description: None,
            kind: AssignmentKind::Individual,
            max_score: 100,
            due_date: ts(1000),
            allow_late_submission: false,
            allow_resubmission: false,
            created_by: 2,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    #[test]
    fn test_create_by_owner() {
        let owner = Actor::new(2, UserRole::Instructor);
        let draft = create(&owner, &class(2), spec(100, ts(1000)), ts(500)).unwrap();
        assert_eq!(draft.class_id, 1);
        assert_eq!(draft.created_by, 2);
    }

    #[test]
    fn test_create_rejects_non_owner() {
        let other = Actor::new(9, UserRole::Instructor);
        assert_eq!(
            create(&other, &class(2), spec(100, ts(1000)), ts(500)),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_due_date_must_be_strictly_future() {
        let owner = Actor::new(2, UserRole::Instructor);
        let c = class(2);
        assert_eq!(
            create(&owner, &c, spec(100, ts(400)), ts(500)),
            Err(Rejection::DueDateNotInFuture)
        );
        assert_eq!(
            create(&owner, &c, spec(100, ts(500)), ts(500)),
            Err(Rejection::DueDateNotInFuture)
        );
        assert!(create(&owner, &c, spec(100, ts(501)), ts(500)).is_ok());
    }

    #[test]
    fn test_max_score_bounds() {
        let owner = Actor::new(2, UserRole::Instructor);
        let c = class(2);
        assert_eq!(
            create(&owner, &c, spec(0, ts(1000)), ts(500)),
            Err(Rejection::MaxScoreOutOfRange)
        );
        assert_eq!(
            create(&owner, &c, spec(MAX_SCORE_LIMIT + 1, ts(1000)), ts(500)),
            Err(Rejection::MaxScoreOutOfRange)
        );
        assert!(create(&owner, &c, spec(MAX_SCORE_LIMIT, ts(1000)), ts(500)).is_ok());
    }

    #[test]
    fn test_update_validates_changed_fields() {
        let owner = Actor::new(2, UserRole::Instructor);
        let c = class(2);
        let a = assignment();

        let past_due = AssignmentChanges {
            due_date: Some(ts(100)),
            ..Default::default()
        };
        assert_eq!(
            update(&owner, &c, &a, past_due, ts(500)),
            Err(Rejection::DueDateNotInFuture)
        );

        let bad_score = AssignmentChanges {
            max_score: Some(-5),
            ..Default::default()
        };
        assert_eq!(
            update(&owner, &c, &a, bad_score, ts(500)),
            Err(Rejection::MaxScoreOutOfRange)
        );

        let ok = AssignmentChanges {
            title: Some("hw1 v2".into()),
            ..Default::default()
        };
        assert!(update(&owner, &c, &a, ok, ts(500)).is_ok());
    }

    #[test]
    fn test_delete_restricted_while_submissions_exist() {
        let owner = Actor::new(2, UserRole::Instructor);
        let c = class(2);
        let a = assignment();

        assert_eq!(delete(&owner, &c, &a, 0, false), Ok(DeleteMode::Plain));
        assert_eq!(
            delete(&owner, &c, &a, 3, false),
            Err(Rejection::AssignmentHasSubmissions)
        );
        assert_eq!(
            delete(&owner, &c, &a, 3, true),
            Ok(DeleteMode::CascadeSubmissions)
        );
    }
}
