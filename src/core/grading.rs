//! 评分规则
//!
//! 评分与提交一一对应：重复评分被拒绝。分数按平台统一 0-100 分制在
//! 边界校验。发布是单向转换，支持批量发布；批量操作逐条独立裁决，
//! 单条失败不中止其余条目，结果以清单形式逐条上报。

use chrono::{DateTime, Utc};

use super::authorization::{Action, Actor, authorize};
use super::{Decision, Rejection};
use crate::models::classes::entities::Class;
use crate::models::grades::entities::Grade;
use crate::models::submissions::entities::Submission;

/// 平台统一的分数上限（与作业 max_score 无关的边界校验）
pub const SCORE_SCALE_MAX: i32 = 100;

/// 新评分草稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeDraft {
    pub submission_id: i64,
    pub grader_id: i64,
    pub score: i32,
    pub feedback: Option<String>,
    pub is_published: bool,
    pub graded_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// 评分更新草稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeUpdate {
    pub grade_id: i64,
    pub score: Option<i32>,
    pub feedback: Option<String>,
}

fn check_score(score: i32) -> Decision<()> {
    if !(0..=SCORE_SCALE_MAX).contains(&score) {
        return Err(Rejection::ScoreOutOfRange);
    }
    Ok(())
}

/// 创建评分
///
/// `existing` 是该提交上的既有评分；存在即拒绝，与分数内容无关。
/// 默认创建为草稿（未发布），`publish_now` 显式要求立即发布。
pub fn create(
    actor: &Actor,
    class: &Class,
    submission: &Submission,
    existing: Option<&Grade>,
    score: i32,
    feedback: Option<String>,
    publish_now: bool,
    now: DateTime<Utc>,
) -> Decision<GradeDraft> {
    authorize(actor, &Action::GradeSubmission { class })?;

    if existing.is_some() {
        return Err(Rejection::AlreadyGraded);
    }

    check_score(score)?;

    Ok(GradeDraft {
        submission_id: submission.id,
        grader_id: actor.id,
        score,
        feedback,
        is_published: publish_now,
        graded_at: now,
        published_at: publish_now.then_some(now),
    })
}

/// 更新评分：仅未发布的评分可更新，发布后不可修正
pub fn update(
    actor: &Actor,
    class: &Class,
    grade: &Grade,
    score: Option<i32>,
    feedback: Option<String>,
) -> Decision<GradeUpdate> {
    authorize(actor, &Action::GradeSubmission { class })?;

    if grade.is_published {
        return Err(Rejection::GradeAlreadyPublished);
    }

    if let Some(score) = score {
        check_score(score)?;
    }

    Ok(GradeUpdate {
        grade_id: grade.id,
        score,
        feedback,
    })
}

/// 批量发布中单个评分的裁决结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    Forbidden,
    NotFound,
    AlreadyPublished,
}

impl PublishOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishOutcome::Published => "published",
            PublishOutcome::Forbidden => "forbidden",
            PublishOutcome::NotFound => "not_found",
            PublishOutcome::AlreadyPublished => "already_published",
        }
    }
}

/// 批量发布的输入：每个请求的评分 ID 以及它的查找结果
///
/// 查不到（含软删除）记 `None`；查到则附带其所属教学班用于所有权裁决。
#[derive(Debug)]
pub struct GradeLookup<'a> {
    pub grade_id: i64,
    pub found: Option<(&'a Grade, &'a Class)>,
}

/// 批量发布清单：逐条结果 + 真正要落库的发布草稿
#[derive(Debug)]
pub struct PublishManifest {
    pub entries: Vec<(i64, PublishOutcome)>,
    pub to_publish: Vec<i64>,
    pub published_at: DateTime<Utc>,
}

/// 批量发布裁决
///
/// 每个 ID 独立裁决：不属于操作者的评分被跳过并单独上报，
/// 绝不因单条失败而中止整批。
pub fn publish_grades<'a>(
    actor: &Actor,
    lookups: &[GradeLookup<'a>],
    now: DateTime<Utc>,
) -> PublishManifest {
    let mut entries = Vec::with_capacity(lookups.len());
    let mut to_publish = Vec::new();

    for lookup in lookups {
        let outcome = match lookup.found {
            None => PublishOutcome::NotFound,
            Some((grade, class)) => {
                if authorize(actor, &Action::PublishGrade { class, grade }).is_err() {
                    PublishOutcome::Forbidden
                } else if grade.is_published {
                    PublishOutcome::AlreadyPublished
                } else {
                    to_publish.push(grade.id);
                    PublishOutcome::Published
                }
            }
        };
        entries.push((lookup.grade_id, outcome));
    }

    PublishManifest {
        entries,
        to_publish,
        published_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::users::entities::UserRole;

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

    fn submission() -> Submission {
        Submission {
            id: 42,
            assignment_id: 1,
            student_id: 5,
            file_token: "tok".into(),
            status: SubmissionStatus::Submitted,
            is_late: false,
            submitted_at: ts(5000),
            updated_at: ts(5000),
        }
    }

    fn grade(id: i64, grader_id: i64, published: bool) -> Grade {
        Grade {
            id,
            submission_id: 42,
            grader_id,
            score: 80,
            feedback: None,
            is_published: published,
            graded_at: ts(6000),
            published_at: published.then(|| ts(6500)),
            updated_at: ts(6000),
        }
    }

    #[test]
    fn test_create_grade_defaults_to_draft() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let draft = create(
            &instructor,
            &class(1, 2),
            &submission(),
            None,
            85,
            Some("不错".into()),
            false,
            ts(7000),
        )
        .unwrap();
        assert!(!draft.is_published);
        assert_eq!(draft.published_at, None);
        assert_eq!(draft.grader_id, 2);
    }

    #[test]
    fn test_create_grade_with_immediate_publication() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let draft = create(
            &instructor,
            &class(1, 2),
            &submission(),
            None,
            85,
            None,
            true,
            ts(7000),
        )
        .unwrap();
        assert!(draft.is_published);
        assert_eq!(draft.published_at, Some(ts(7000)));
    }

    #[test]
    fn test_second_grade_rejected_regardless_of_content() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let existing = grade(1, 2, false);
        assert_eq!(
            create(
                &instructor,
                &class(1, 2),
                &submission(),
                Some(&existing),
                60,
                Some("换个分数也不行".into()),
                false,
                ts(8000),
            ),
            Err(Rejection::AlreadyGraded)
        );
    }

    #[test]
    fn test_score_bounds() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let c = class(1, 2);
        let s = submission();
        for bad in [-1, 101] {
            assert_eq!(
                create(&instructor, &c, &s, None, bad, None, false, ts(7000)),
                Err(Rejection::ScoreOutOfRange)
            );
        }
        for ok in [0, 100] {
            assert!(create(&instructor, &c, &s, None, ok, None, false, ts(7000)).is_ok());
        }
    }

    #[test]
    fn test_foreign_instructor_cannot_grade() {
        let other = Actor::new(9, UserRole::Instructor);
        assert_eq!(
            create(
                &other,
                &class(1, 2),
                &submission(),
                None,
                85,
                None,
                false,
                ts(7000)
            ),
            Err(Rejection::Forbidden)
        );
    }

    #[test]
    fn test_update_rejected_after_publication() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let published = grade(1, 2, true);
        assert_eq!(
            update(&instructor, &class(1, 2), &published, Some(90), None),
            Err(Rejection::GradeAlreadyPublished)
        );

        let draft = grade(1, 2, false);
        let upd = update(&instructor, &class(1, 2), &draft, Some(90), None).unwrap();
        assert_eq!(upd.score, Some(90));
    }

    #[test]
    fn test_publish_manifest_partial_failure() {
        // g1、g3 属于 instructor 2，g2 属于 instructor 9：
        // g2 被跳过并单独上报，g1/g3 照常发布
        let instructor = Actor::new(2, UserRole::Instructor);
        let own_class = class(1, 2);
        let foreign_class = class(2, 9);
        let g1 = grade(1, 2, false);
        let g2 = grade(2, 9, false);
        let g3 = grade(3, 2, false);

        let lookups = vec![
            GradeLookup {
                grade_id: 1,
                found: Some((&g1, &own_class)),
            },
            GradeLookup {
                grade_id: 2,
                found: Some((&g2, &foreign_class)),
            },
            GradeLookup {
                grade_id: 3,
                found: Some((&g3, &own_class)),
            },
        ];

        let manifest = publish_grades(&instructor, &lookups, ts(9000));
        assert_eq!(
            manifest.entries,
            vec![
                (1, PublishOutcome::Published),
                (2, PublishOutcome::Forbidden),
                (3, PublishOutcome::Published),
            ]
        );
        assert_eq!(manifest.to_publish, vec![1, 3]);
        assert_eq!(manifest.published_at, ts(9000));
    }

    #[test]
    fn test_publish_reports_missing_and_already_published() {
        let instructor = Actor::new(2, UserRole::Instructor);
        let own_class = class(1, 2);
        let published = grade(4, 2, true);

        let lookups = vec![
            GradeLookup {
                grade_id: 99,
                found: None,
            },
            GradeLookup {
                grade_id: 4,
                found: Some((&published, &own_class)),
            },
        ];

        let manifest = publish_grades(&instructor, &lookups, ts(9000));
        assert_eq!(
            manifest.entries,
            vec![
                (99, PublishOutcome::NotFound),
                (4, PublishOutcome::AlreadyPublished),
            ]
        );
        assert!(manifest.to_publish.is_empty());
    }
}
