//! 提交状态机
//!
//! 提交与重交的接受/拒绝裁决。迟交标志在提交或重交的那一刻用注入的
//! 时钟计算一次，之后永不重算；重交原地更新既有记录，每个
//! (assignment, student) 至多一条有效提交。
//!
//! 文件内容本层不关心：调用方先通过文件存储层换取引用（token），
//! 存储失败必须在调用本层之前就当作硬拒绝处理，不得留下半提交状态。

use chrono::{DateTime, Utc};

use super::authorization::{Action, Actor, authorize};
use super::{Decision, Rejection};
use crate::models::assignments::entities::Assignment;
use crate::models::classes::entities::Class;
use crate::models::enrollments::entities::Enrollment;
use crate::models::grades::entities::Grade;
use crate::models::submissions::entities::{Submission, SubmissionStatus};

/// 新提交草稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_token: String,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub submitted_at: DateTime<Utc>,
}

/// 重交草稿：对既有记录的原地更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResubmissionDraft {
    pub submission_id: i64,
    pub file_token: String,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub submitted_at: DateTime<Utc>,
}

/// 迟交裁决：迟交且作业不允许迟交时返回 `SubmissionClosed`
fn lateness(assignment: &Assignment, now: DateTime<Utc>) -> Decision<(bool, SubmissionStatus)> {
    let is_late = now > assignment.due_date;
    if is_late && !assignment.allow_late_submission {
        return Err(Rejection::SubmissionClosed);
    }
    let status = if is_late {
        SubmissionStatus::Late
    } else {
        SubmissionStatus::Submitted
    };
    Ok((is_late, status))
}

/// 首次提交
///
/// `existing` 是该学生在该作业上的既有有效提交；存在即拒绝
/// （调用方应改走重交通道）。
pub fn submit(
    actor: &Actor,
    class: &Class,
    assignment: &Assignment,
    enrollment: Option<&Enrollment>,
    existing: Option<&Submission>,
    file_token: String,
    now: DateTime<Utc>,
) -> Decision<SubmissionDraft> {
    authorize(actor, &Action::SubmitWork { class, enrollment })?;

    if existing.is_some() {
        return Err(Rejection::AlreadySubmitted);
    }

    let (is_late, status) = lateness(assignment, now)?;

    Ok(SubmissionDraft {
        assignment_id: assignment.id,
        student_id: actor.id,
        file_token,
        status,
        is_late,
        submitted_at: now,
    })
}

/// 重交
///
/// 迟交政策按当前时刻重新裁决；已评分的提交一律拒绝重交
/// （没有"重新开放"操作，见 DESIGN.md）。
pub fn resubmit(
    actor: &Actor,
    assignment: &Assignment,
    submission: &Submission,
    grade: Option<&Grade>,
    file_token: String,
    now: DateTime<Utc>,
) -> Decision<ResubmissionDraft> {
    // 只有提交本人可以重交
    if actor.role != crate::models::users::entities::UserRole::Student
        || submission.student_id != actor.id
    {
        return Err(Rejection::Forbidden);
    }

    if !assignment.allow_resubmission {
        return Err(Rejection::ResubmissionNotAllowed);
    }

    if grade.is_some() {
        return Err(Rejection::CannotResubmitGradedWork);
    }

    let (is_late, status) = lateness(assignment, now)?;

    Ok(ResubmissionDraft {
        submission_id: submission.id,
        file_token,
        status,
        is_late,
        submitted_at: now,
    })
}

/// 撤回提交：仅限提交本人，且未评分
pub fn delete(actor: &Actor, submission: &Submission, grade: Option<&Grade>) -> Decision<()> {
    if actor.role != crate::models::users::entities::UserRole::Student
        || submission.student_id != actor.id
    {
        return Err(Rejection::Forbidden);
    }
    if grade.is_some() {
        return Err(Rejection::CannotDeleteGradedSubmission);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentKind;
    use crate::models::users::entities::UserRole;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    const DUE: i64 = 10_000;

    fn class() -> Class {
        Class {
            id: 1,
            course_id: 1,
            instructor_id: 2,
            semester: "2026-spring".into(),
            max_capacity: 30,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn assignment(allow_late: bool, allow_resubmit: bool) -> Assignment {
        Assignment {
            id: 1,
            class_id: 1,
            title: "hw1".into(),
            description: None,
            kind: AssignmentKind::Individual,
            max_score: 100,
            due_date: ts(DUE),
            allow_late_submission: allow_late,
            allow_resubmission: allow_resubmit,
            created_by: 2,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn enrollment(student_id: i64) -> Enrollment {
        Enrollment {
            id: 1,
            class_id: 1,
            student_id,
            is_active: true,
            enrolled_at: ts(100),
            updated_at: ts(100),
        }
    }

    fn submission(student_id: i64, is_late: bool) -> Submission {
        Submission {
            id: 42,
            assignment_id: 1,
            student_id,
            file_token: "tok-v1".into(),
            status: if is_late {
                SubmissionStatus::Late
            } else {
                SubmissionStatus::Submitted
            },
            is_late,
            submitted_at: ts(5000),
            updated_at: ts(5000),
        }
    }

    fn grade() -> Grade {
        Grade {
            id: 1,
            submission_id: 42,
            grader_id: 2,
            score: 90,
            feedback: None,
            is_published: false,
            graded_at: ts(6000),
            published_at: None,
            updated_at: ts(6000),
        }
    }

    #[test]
    fn test_submit_one_second_before_deadline() {
        let student = Actor::new(5, UserRole::Student);
        let e = enrollment(5);
        let draft = submit(
            &student,
            &class(),
            &assignment(false, false),
            Some(&e),
            None,
            "tok".into(),
            ts(DUE - 1),
        )
        .unwrap();
        assert!(!draft.is_late);
        assert_eq!(draft.status, SubmissionStatus::Submitted);
        assert_eq!(draft.submitted_at, ts(DUE - 1));
    }

    #[test]
    fn test_submit_one_second_after_deadline_closed() {
        let student = Actor::new(6, UserRole::Student);
        let e = enrollment(6);
        assert_eq!(
            submit(
                &student,
                &class(),
                &assignment(false, false),
                Some(&e),
                None,
                "tok".into(),
                ts(DUE + 1),
            ),
            Err(Rejection::SubmissionClosed)
        );
    }

    #[test]
    fn test_submit_exactly_at_deadline_not_late() {
        let student = Actor::new(5, UserRole::Student);
        let e = enrollment(5);
        let draft = submit(
            &student,
            &class(),
            &assignment(false, false),
            Some(&e),
            None,
            "tok".into(),
            ts(DUE),
        )
        .unwrap();
        assert!(!draft.is_late);
    }

    #[test]
    fn test_late_submission_flagged_when_policy_allows() {
        let student = Actor::new(5, UserRole::Student);
        let e = enrollment(5);
        let draft = submit(
            &student,
            &class(),
            &assignment(true, false),
            Some(&e),
            None,
            "tok".into(),
            ts(DUE + 60),
        )
        .unwrap();
        assert!(draft.is_late);
        assert_eq!(draft.status, SubmissionStatus::Late);
    }

    #[test]
    fn test_second_submit_rejected() {
        let student = Actor::new(5, UserRole::Student);
        let e = enrollment(5);
        let existing = submission(5, false);
        assert_eq!(
            submit(
                &student,
                &class(),
                &assignment(true, true),
                Some(&e),
                Some(&existing),
                "tok-v2".into(),
                ts(6000),
            ),
            Err(Rejection::AlreadySubmitted)
        );
    }

    #[test]
    fn test_submit_requires_active_enrollment() {
        let student = Actor::new(5, UserRole::Student);
        assert_eq!(
            submit(
                &student,
                &class(),
                &assignment(true, true),
                None,
                None,
                "tok".into(),
                ts(5000),
            ),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_resubmit_updates_in_place_and_recomputes_lateness() {
        let student = Actor::new(5, UserRole::Student);
        let existing = submission(5, false);

        // 截止前重交：同一条记录，新文件，仍不迟交
        let draft = resubmit(
            &student,
            &assignment(true, true),
            &existing,
            None,
            "tok-v2".into(),
            ts(7000),
        )
        .unwrap();
        assert_eq!(draft.submission_id, 42);
        assert_eq!(draft.file_token, "tok-v2");
        assert!(!draft.is_late);

        // 截止后重交：迟交标志按重交时刻重新计算
        let draft = resubmit(
            &student,
            &assignment(true, true),
            &existing,
            None,
            "tok-v3".into(),
            ts(DUE + 5),
        )
        .unwrap();
        assert!(draft.is_late);
        assert_eq!(draft.status, SubmissionStatus::Late);
    }

    #[test]
    fn test_resubmit_respects_late_policy() {
        let student = Actor::new(5, UserRole::Student);
        let existing = submission(5, false);
        assert_eq!(
            resubmit(
                &student,
                &assignment(false, true),
                &existing,
                None,
                "tok-v2".into(),
                ts(DUE + 5),
            ),
            Err(Rejection::SubmissionClosed)
        );
    }

    #[test]
    fn test_resubmit_rejected_when_policy_disallows() {
        let student = Actor::new(5, UserRole::Student);
        let existing = submission(5, false);
        assert_eq!(
            resubmit(
                &student,
                &assignment(true, false),
                &existing,
                None,
                "tok-v2".into(),
                ts(7000),
            ),
            Err(Rejection::ResubmissionNotAllowed)
        );
    }

    #[test]
    fn test_resubmit_rejected_after_grading() {
        let student = Actor::new(5, UserRole::Student);
        let existing = submission(5, false);
        let g = grade();
        assert_eq!(
            resubmit(
                &student,
                &assignment(true, true),
                &existing,
                Some(&g),
                "tok-v2".into(),
                ts(7000),
            ),
            Err(Rejection::CannotResubmitGradedWork)
        );
    }

    #[test]
    fn test_resubmit_only_by_owner() {
        let other = Actor::new(6, UserRole::Student);
        let existing = submission(5, false);
        assert_eq!(
            resubmit(
                &other,
                &assignment(true, true),
                &existing,
                None,
                "tok-v2".into(),
                ts(7000),
            ),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_delete_own_ungraded_submission() {
        let student = Actor::new(5, UserRole::Student);
        assert!(delete(&student, &submission(5, false), None).is_ok());
    }

    #[test]
    fn test_delete_graded_submission_rejected() {
        let student = Actor::new(5, UserRole::Student);
        let g = grade();
        assert_eq!(
            delete(&student, &submission(5, false), Some(&g)),
            Err(Rejection::CannotDeleteGradedSubmission)
        );
    }

    #[test]
    fn test_delete_foreign_submission_forbidden() {
        let other = Actor::new(6, UserRole::Student);
        assert_eq!(
            delete(&other, &submission(5, false), None),
            Err(Rejection::Forbidden)
        );
    }
}
