//! 选课规则
//!
//! 容量上限与"每个学生每个教学班至多一条活跃选课"两条不变量在这里裁决。
//! 决策基于调用前取出的快照；真正的防并发写入（事务内复查 + 唯一约束）
//! 由存储层完成，本层只声明前置条件。

use chrono::{DateTime, Utc};

use super::authorization::{Action, Actor, authorize};
use super::{Decision, Rejection};
use crate::models::classes::entities::Class;
use crate::models::enrollments::entities::Enrollment;

/// 选课草稿：待持久化的新状态描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentDraft {
    /// 首次选课，插入新记录
    Create {
        class_id: i64,
        student_id: i64,
        enrolled_at: DateTime<Utc>,
    },
    /// 退课后重新选课，复用历史记录（保证 (student, class) 唯一）
    Reactivate {
        enrollment_id: i64,
        enrolled_at: DateTime<Utc>,
    },
}

/// 选课决策
///
/// `active_enrollments` 是该教学班当前活跃选课数，`existing` 是该学生在
/// 该班的既有选课记录（活跃或历史）。重复选课返回显式拒绝而非静默成功。
pub fn enroll(
    actor: &Actor,
    class: &Class,
    active_enrollments: i64,
    existing: Option<&Enrollment>,
    now: DateTime<Utc>,
) -> Decision<EnrollmentDraft> {
    authorize(actor, &Action::ManageOwnEnrollment { student_id: actor.id })?;

    // 已有活跃选课：优先于容量检查，重复请求的拒绝原因要稳定
    if existing.is_some_and(|e| e.is_active) {
        return Err(Rejection::AlreadyEnrolled);
    }

    if active_enrollments >= class.max_capacity {
        return Err(Rejection::CapacityExceeded);
    }

    Ok(match existing {
        Some(e) => EnrollmentDraft::Reactivate {
            enrollment_id: e.id,
            enrolled_at: now,
        },
        None => EnrollmentDraft::Create {
            class_id: class.id,
            student_id: actor.id,
            enrolled_at: now,
        },
    })
}

/// 退课决策：把匹配的活跃选课标记为不活跃，历史不删除
///
/// 成功时返回待停用的选课记录 ID。
pub fn unenroll(actor: &Actor, existing: Option<&Enrollment>) -> Decision<i64> {
    authorize(actor, &Action::ManageOwnEnrollment { student_id: actor.id })?;

    match existing {
        Some(e) if e.is_active => Ok(e.id),
        _ => Err(Rejection::NotEnrolled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn class(max_capacity: i64) -> Class {
        Class {
            id: 1,
            course_id: 1,
            instructor_id: 2,
            semester: "2026-spring".into(),
            max_capacity,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn record(id: i64, student_id: i64, active: bool) -> Enrollment {
        Enrollment {
            id,
            class_id: 1,
            student_id,
            is_active: active,
            enrolled_at: ts(50),
            updated_at: ts(50),
        }
    }

    #[test]
    fn test_enroll_creates_record() {
        let student = Actor::new(5, UserRole::Student);
        let draft = enroll(&student, &class(30), 0, None, ts(100)).unwrap();
        assert_eq!(
            draft,
            EnrollmentDraft::Create {
                class_id: 1,
                student_id: 5,
                enrolled_at: ts(100),
            }
        );
    }

    #[test]
    fn test_enroll_last_seat_succeeds_full_class_rejected() {
        let student = Actor::new(5, UserRole::Student);
        let c = class(30);

        // 还剩最后一个名额
        assert!(enroll(&student, &c, 29, None, ts(100)).is_ok());
        // 已满：拒绝且不产生任何草稿（班级状态不变）
        assert_eq!(
            enroll(&student, &c, 30, None, ts(100)),
            Err(Rejection::CapacityExceeded)
        );
    }

    #[test]
    fn test_duplicate_enroll_rejected_not_silently_accepted() {
        let student = Actor::new(5, UserRole::Student);
        let active = record(7, 5, true);
        assert_eq!(
            enroll(&student, &class(30), 1, Some(&active), ts(100)),
            Err(Rejection::AlreadyEnrolled)
        );
        // 即便班级已满，重复选课的拒绝原因也保持稳定
        assert_eq!(
            enroll(&student, &class(1), 1, Some(&active), ts(100)),
            Err(Rejection::AlreadyEnrolled)
        );
    }

    #[test]
    fn test_reenroll_reactivates_history_row() {
        let student = Actor::new(5, UserRole::Student);
        let inactive = record(7, 5, false);
        let draft = enroll(&student, &class(30), 3, Some(&inactive), ts(200)).unwrap();
        assert_eq!(
            draft,
            EnrollmentDraft::Reactivate {
                enrollment_id: 7,
                enrolled_at: ts(200),
            }
        );
    }

    #[test]
    fn test_non_student_cannot_enroll() {
        let instructor = Actor::new(2, UserRole::Instructor);
        assert_eq!(
            enroll(&instructor, &class(30), 0, None, ts(100)),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_unenroll_flips_active_record() {
        let student = Actor::new(5, UserRole::Student);
        assert_eq!(unenroll(&student, Some(&record(7, 5, true))), Ok(7));
    }

    #[test]
    fn test_unenroll_requires_active_enrollment() {
        let student = Actor::new(5, UserRole::Student);
        assert_eq!(unenroll(&student, None), Err(Rejection::NotEnrolled));
        assert_eq!(
            unenroll(&student, Some(&record(7, 5, false))),
            Err(Rejection::NotEnrolled)
        );
    }
}
