//! 作业存储操作

use super::SeaOrmStorage;
use crate::core::assignments::{AssignmentChanges, AssignmentDraft, DeleteMode};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment, requests::AssignmentListQuery, responses::AssignmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, draft: AssignmentDraft) -> Result<Assignment> {
        let now = draft.created_at.timestamp();

        let model = ActiveModel {
            class_id: Set(draft.class_id),
            created_by: Set(draft.created_by),
            title: Set(draft.spec.title),
            description: Set(draft.spec.description),
            kind: Set(draft.spec.kind.to_string()),
            max_score: Set(draft.spec.max_score),
            due_date: Set(draft.spec.due_date.timestamp()),
            allow_late_submission: Set(draft.spec.allow_late_submission),
            allow_resubmission: Set(draft.spec.allow_resubmission),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find().filter(Column::DeletedAt.is_null());

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        select = select.order_by_desc(Column::DueDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        changes: AssignmentChanges,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(description) = changes.description {
            model.description = Set(Some(description));
        }
        if let Some(max_score) = changes.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(due_date) = changes.due_date {
            model.due_date = Set(due_date.timestamp());
        }
        if let Some(allow_late) = changes.allow_late_submission {
            model.allow_late_submission = Set(allow_late);
        }
        if let Some(allow_resubmit) = changes.allow_resubmission {
            model.allow_resubmission = Set(allow_resubmit);
        }

        model
            .update(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 软删除作业；级联模式下同一事务内软删除其提交与评分
    pub async fn delete_assignment_impl(
        &self,
        assignment_id: i64,
        mode: DeleteMode,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = self
            .db
            .transaction::<_, u64, AssignHubError>(move |txn| {
                Box::pin(async move {
                    if mode == DeleteMode::CascadeSubmissions {
                        // 先收集有效提交 ID，再软删除它们的评分与记录本身
                        let submission_ids: Vec<i64> = Submissions::find()
                            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
                            .filter(SubmissionColumn::DeletedAt.is_null())
                            .select_only()
                            .column(SubmissionColumn::Id)
                            .into_tuple()
                            .all(txn)
                            .await?;

                        if !submission_ids.is_empty() {
                            Grades::update_many()
                                .col_expr(
                                    GradeColumn::DeletedAt,
                                    sea_orm::sea_query::Expr::value(now),
                                )
                                .filter(GradeColumn::SubmissionId.is_in(submission_ids.clone()))
                                .filter(GradeColumn::DeletedAt.is_null())
                                .exec(txn)
                                .await?;

                            Submissions::update_many()
                                .col_expr(
                                    SubmissionColumn::DeletedAt,
                                    sea_orm::sea_query::Expr::value(now),
                                )
                                .filter(SubmissionColumn::Id.is_in(submission_ids))
                                .exec(txn)
                                .await?;
                        }
                    }

                    let result = Assignments::update_many()
                        .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
                        .filter(Column::Id.eq(assignment_id))
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

    /// 作业下的有效提交数量
    pub async fn count_live_submissions_impl(&self, assignment_id: i64) -> Result<i64> {
        let count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("统计提交数量失败: {e}")))?;

        Ok(count as i64)
    }
}
