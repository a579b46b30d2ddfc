//! 提交存储操作
//!
//! (assignment_id, student_id) 唯一约束保证每对至多一条记录；
//! 学生撤回过的提交是同一行的软删除态，再次提交时复活该行，
//! 并发重复提交由唯一约束兜底。

use super::SeaOrmStorage;
use crate::core::submissions::{ResubmissionDraft, SubmissionDraft};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::Entity as Users;
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::SubmissionListQuery,
        responses::{SubmissionListItem, SubmissionListResponse, SubmissionStudent},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生在某作业上的有效提交
    pub async fn get_live_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询有效提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 执行提交草稿
    ///
    /// 该学生此前撤回过提交时复活同一行（保持唯一约束成立），
    /// 否则插入新记录。
    pub async fn apply_submission_impl(&self, draft: SubmissionDraft) -> Result<Submission> {
        let result = self
            .db
            .transaction::<_, crate::entity::submissions::Model, AssignHubError>(move |txn| {
                Box::pin(async move {
                    let now = draft.submitted_at.timestamp();

                    // 查找被撤回（软删除）的历史行
                    let withdrawn = Submissions::find()
                        .filter(Column::AssignmentId.eq(draft.assignment_id))
                        .filter(Column::StudentId.eq(draft.student_id))
                        .filter(Column::DeletedAt.is_not_null())
                        .one(txn)
                        .await?;

                    let model = match withdrawn {
                        Some(row) => {
                            ActiveModel {
                                id: Set(row.id),
                                file_token: Set(draft.file_token),
                                status: Set(draft.status.to_string()),
                                is_late: Set(draft.is_late),
                                submitted_at: Set(now),
                                updated_at: Set(now),
                                deleted_at: Set(None),
                                ..Default::default()
                            }
                            .update(txn)
                            .await?
                        }
                        None => {
                            ActiveModel {
                                assignment_id: Set(draft.assignment_id),
                                student_id: Set(draft.student_id),
                                file_token: Set(draft.file_token),
                                status: Set(draft.status.to_string()),
                                is_late: Set(draft.is_late),
                                submitted_at: Set(now),
                                updated_at: Set(now),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await?
                        }
                    };

                    Ok(model)
                })
            })
            .await;

        match result {
            Ok(model) => Ok(model.into_submission()),
            Err(sea_orm::TransactionError::Connection(e)) => Err(e.into()),
            Err(sea_orm::TransactionError::Transaction(e)) => Err(e),
        }
    }

    /// 执行重交草稿：原地更新既有记录
    pub async fn apply_resubmission_impl(
        &self,
        draft: ResubmissionDraft,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(draft.submission_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = draft.submitted_at.timestamp();

        let model = ActiveModel {
            id: Set(draft.submission_id),
            file_token: Set(draft.file_token),
            status: Set(draft.status.to_string()),
            is_late: Set(draft.is_late),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        self.get_submission_by_id_impl(draft.submission_id).await
    }

    /// 软删除提交（撤回），同一事务内连带软删除其评分
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = self
            .db
            .transaction::<_, u64, AssignHubError>(move |txn| {
                Box::pin(async move {
                    Grades::update_many()
                        .col_expr(GradeColumn::DeletedAt, sea_orm::sea_query::Expr::value(now))
                        .filter(GradeColumn::SubmissionId.eq(submission_id))
                        .filter(GradeColumn::DeletedAt.is_null())
                        .exec(txn)
                        .await?;

                    let result = Submissions::update_many()
                        .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
                        .filter(Column::Id.eq(submission_id))
                        .filter(Column::DeletedAt.is_null())
                        .exec(txn)
                        .await?;

                    Ok(result.rows_affected)
                })
            })
            .await;

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(sea_orm::TransactionError::Connection(e)) => Err(e.into()),
            Err(sea_orm::TransactionError::Transaction(e)) => Err(e),
        }
    }

    /// 分页列出提交（教师视角，含提交者与是否已评分）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find().filter(Column::DeletedAt.is_null());

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = select
            .order_by_desc(Column::SubmittedAt)
            .find_also_related(Users);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 一次查出这一页提交的评分存在性
        let submission_ids: Vec<i64> = rows.iter().map(|(s, _)| s.id).collect();
        let graded_ids: Vec<i64> = if submission_ids.is_empty() {
            vec![]
        } else {
            Grades::find()
                .filter(GradeColumn::SubmissionId.is_in(submission_ids))
                .filter(GradeColumn::DeletedAt.is_null())
                .select_only()
                .column(GradeColumn::SubmissionId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    AssignHubError::database_operation(format!("查询评分存在性失败: {e}"))
                })?
        };

        let items = rows
            .into_iter()
            .map(|(submission, user)| {
                let graded = graded_ids.contains(&submission.id);
                let student = match user {
                    Some(u) => SubmissionStudent {
                        id: u.id,
                        username: u.username,
                        display_name: u.display_name,
                    },
                    None => SubmissionStudent {
                        id: submission.student_id,
                        username: String::new(),
                        display_name: None,
                    },
                };
                SubmissionListItem {
                    submission: submission.into_submission(),
                    student,
                    graded,
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
