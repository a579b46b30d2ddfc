//! 授权决策表
//!
//! 每个可变操作在执行前先经过这里：给定操作者与目标资源的所有权快照，
//! 自上而下匹配固定决策表，首条命中即生效，其余组合一律拒绝。
//! 决策是纯函数，没有任何副作用；拒绝是类型化的 `Forbidden`，
//! 调用方必须能把它与"资源不存在"区分开。

use super::{Decision, Rejection};
use crate::models::classes::entities::Class;
use crate::models::enrollments::entities::Enrollment;
use crate::models::grades::entities::Grade;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{User, UserRole};

/// 发起操作的主体，由认证层（JWT 中间件）提供
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}

/// 受授权决策表管辖的操作
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    /// 平台管理操作：课程 CRUD、用户删除、教学班删除
    Administer,
    /// 在教学班内创建/更新/删除作业
    ManageAssignments { class: &'a Class },
    /// 给教学班内的提交评分（创建或更新评分）
    GradeSubmission { class: &'a Class },
    /// 发布评分，只能发布自己创建的评分
    PublishGrade { class: &'a Class, grade: &'a Grade },
    /// 提交/重交作业，需要在该教学班有活跃选课
    SubmitWork {
        class: &'a Class,
        enrollment: Option<&'a Enrollment>,
    },
    /// 选课/退课，只能为本人操作
    ManageOwnEnrollment { student_id: i64 },
    /// 查看提交详情
    ViewSubmission {
        submission: &'a Submission,
        class: &'a Class,
    },
    /// 查看评分（学生只能看到自己提交上已发布的评分，发布过滤在读取路径做）
    ViewGrade {
        submission: &'a Submission,
        class: &'a Class,
    },
}

/// 固定决策表，按角色穷尽匹配
///
/// 新增角色或操作时编译器会强制补全所有分支。
pub fn authorize(actor: &Actor, action: &Action) -> Decision<()> {
    let allowed = match actor.role {
        // 管理员：仅平台管理操作，不参与教学流程
        UserRole::Admin => matches!(action, Action::Administer),

        // 教师：仅在自己授课的教学班内操作
        UserRole::Instructor => match action {
            Action::ManageAssignments { class } | Action::GradeSubmission { class } => {
                class.instructor_id == actor.id
            }
            Action::PublishGrade { class, grade } => {
                class.instructor_id == actor.id && grade.grader_id == actor.id
            }
            Action::ViewSubmission { class, .. } | Action::ViewGrade { class, .. } => {
                class.instructor_id == actor.id
            }
            Action::Administer
            | Action::SubmitWork { .. }
            | Action::ManageOwnEnrollment { .. } => false,
        },

        // 学生：只操作自己的选课、提交与评分
        UserRole::Student => match action {
            Action::SubmitWork { class, enrollment } => enrollment.is_some_and(|e| {
                e.student_id == actor.id && e.class_id == class.id && e.is_active
            }),
            Action::ManageOwnEnrollment { student_id } => *student_id == actor.id,
            Action::ViewSubmission { submission, .. } | Action::ViewGrade { submission, .. } => {
                submission.student_id == actor.id
            }
            Action::Administer
            | Action::ManageAssignments { .. }
            | Action::GradeSubmission { .. }
            | Action::PublishGrade { .. } => false,
        },
    };

    if allowed { Ok(()) } else { Err(Rejection::Forbidden) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn class(id: i64, instructor_id: i64) -> Class {
        Class {
            id,
            course_id: 1,
            instructor_id,
            semester: "2026-spring".into(),
            max_capacity: 30,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn enrollment(student_id: i64, class_id: i64, active: bool) -> Enrollment {
        Enrollment {
            id: 1,
            class_id,
            student_id,
            is_active: active,
            enrolled_at: ts(100),
            updated_at: ts(100),
        }
    }

    fn submission(student_id: i64) -> Submission {
        use crate::models::submissions::entities::SubmissionStatus;
        Submission {
            id: 1,
            assignment_id: 1,
            student_id,
            file_token: "tok".into(),
            status: SubmissionStatus::Submitted,
            is_late: false,
            submitted_at: ts(200),
            updated_at: ts(200),
        }
    }

    fn grade(grader_id: i64) -> Grade {
        Grade {
            id: 1,
            submission_id: 1,
            grader_id,
            score: 80,
            feedback: None,
            is_published: false,
            graded_at: ts(300),
            published_at: None,
            updated_at: ts(300),
        }
    }

    #[test]
    fn test_admin_administers_but_does_not_teach() {
        let admin = Actor::new(1, UserRole::Admin);
        let c = class(1, 2);

        assert!(authorize(&admin, &Action::Administer).is_ok());
        assert_eq!(
            authorize(&admin, &Action::ManageAssignments { class: &c }),
            Err(Rejection::Forbidden)
        );
        assert_eq!(
            authorize(&admin, &Action::GradeSubmission { class: &c }),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_instructor_owns_class() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let own = class(1, 2);
        let other = class(2, 9);

        assert!(authorize(&instructor, &Action::ManageAssignments { class: &own }).is_ok());
        assert_eq!(
            authorize(&instructor, &Action::ManageAssignments { class: &other }),
            Err(Rejection::Forbidden)
        );
        assert!(authorize(&instructor, &Action::GradeSubmission { class: &own }).is_ok());
        assert_eq!(
            authorize(&instructor, &Action::Administer),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_instructor_publishes_only_own_grades() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let own = class(1, 2);
        let own_grade = grade(2);
        let foreign_grade = grade(9);

        assert!(
            authorize(
                &instructor,
                &Action::PublishGrade {
                    class: &own,
                    grade: &own_grade
                }
            )
            .is_ok()
        );
        assert_eq!(
            authorize(
                &instructor,
                &Action::PublishGrade {
                    class: &own,
                    grade: &foreign_grade
                }
            ),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_student_needs_active_enrollment_to_submit() {
        let student = Actor::new(5, UserRole::Student);
        let c = class(1, 2);
        let active = enrollment(5, 1, true);
        let inactive = enrollment(5, 1, false);
        let someone_elses = enrollment(6, 1, true);

        assert!(
            authorize(
                &student,
                &Action::SubmitWork {
                    class: &c,
                    enrollment: Some(&active)
                }
            )
            .is_ok()
        );
        for e in [None, Some(&inactive), Some(&someone_elses)] {
            assert_eq!(
                authorize(
                    &student,
                    &Action::SubmitWork {
                        class: &c,
                        enrollment: e
                    }
                ),
                Err(Rejection::Forbidden)
            );
        }
    }

    #[test]
    fn test_student_enrolls_only_self() {
        let student = Actor::new(5, UserRole::Student);
        assert!(authorize(&student, &Action::ManageOwnEnrollment { student_id: 5 }).is_ok());
        assert_eq!(
            authorize(&student, &Action::ManageOwnEnrollment { student_id: 6 }),
            Err(Rejection::Forbidden)
        );
        // 教师不通过选课通道进入教学班
        let instructor = Actor::new(2, UserRole::Instructor);
        assert_eq!(
            authorize(&instructor, &Action::ManageOwnEnrollment { student_id: 2 }),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_view_rules() {
        let student = Actor::new(5, UserRole::Student);
        let instructor = Actor::new(2, UserRole::Instructor);
        let c = class(1, 2);
        let own_sub = submission(5);
        let other_sub = submission(6);

        assert!(
            authorize(
                &student,
                &Action::ViewSubmission {
                    submission: &own_sub,
                    class: &c
                }
            )
            .is_ok()
        );
        assert_eq!(
            authorize(
                &student,
                &Action::ViewSubmission {
                    submission: &other_sub,
                    class: &c
                }
            ),
            Err(Rejection::Forbidden)
        );
        assert!(
            authorize(
                &instructor,
                &Action::ViewSubmission {
                    submission: &other_sub,
                    class: &c
                }
            )
            .is_ok()
        );
    }
}
