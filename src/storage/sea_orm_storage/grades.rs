//! 评分存储操作
//!
//! submission_id 唯一约束保证评分与提交一一对应，
//! 并发重复评分中后到者以 ConstraintConflict 失败。

use super::SeaOrmStorage;
use crate::core::grading::{GradeDraft, GradeUpdate};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    classes::entities::Class,
    grades::{entities::Grade, requests::GradeListQuery, responses::GradeListResponse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 执行评分草稿
    pub async fn apply_grade_impl(&self, draft: GradeDraft) -> Result<Grade> {
        let now = draft.graded_at.timestamp();

        let model = ActiveModel {
            submission_id: Set(draft.submission_id),
            grader_id: Set(draft.grader_id),
            score: Set(draft.score),
            feedback: Set(draft.feedback),
            is_published: Set(draft.is_published),
            graded_at: Set(now),
            published_at: Set(draft.published_at.map(|ts| ts.timestamp())),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取评分
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 通过提交 ID 获取评分
    pub async fn get_grade_by_submission_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 获取评分及其所属教学班（沿 提交→作业→教学班 链取所有权）
    pub async fn get_grade_with_class_impl(&self, grade_id: i64) -> Result<Option<(Grade, Class)>> {
        let grade = match self.get_grade_by_id_impl(grade_id).await? {
            Some(g) => g,
            None => return Ok(None),
        };

        let submission = Submissions::find_by_id(grade.submission_id)
            .filter(SubmissionColumn::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;
        let Some(submission) = submission else {
            return Ok(None);
        };

        let assignment = Assignments::find_by_id(submission.assignment_id)
            .filter(AssignmentColumn::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询作业失败: {e}")))?;
        let Some(assignment) = assignment else {
            return Ok(None);
        };

        let class = Classes::find_by_id(assignment.class_id)
            .filter(ClassColumn::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教学班失败: {e}")))?;

        Ok(class.map(|c| (grade, c.into_class())))
    }

    /// 执行评分更新草稿
    pub async fn apply_grade_update_impl(&self, update: GradeUpdate) -> Result<Option<Grade>> {
        let existing = self.get_grade_by_id_impl(update.grade_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(update.grade_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(score) = update.score {
            model.score = Set(score);
        }
        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }

        model
            .update(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        self.get_grade_by_id_impl(update.grade_id).await
    }

    /// 批量置为已发布
    pub async fn publish_grades_impl(
        &self,
        grade_ids: &[i64],
        published_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64> {
        if grade_ids.is_empty() {
            return Ok(0);
        }

        let ts = published_at.timestamp();

        let result = Grades::update_many()
            .col_expr(Column::IsPublished, sea_orm::sea_query::Expr::value(true))
            .col_expr(Column::PublishedAt, sea_orm::sea_query::Expr::value(ts))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(ts))
            .filter(Column::Id.is_in(grade_ids.to_vec()))
            .filter(Column::IsPublished.eq(false))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("发布评分失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 分页列出评分
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Grades::find().filter(Column::DeletedAt.is_null());

        if let Some(assignment_id) = query.assignment_id {
            // 沿提交关联过滤到指定作业
            let submission_ids: Vec<i64> = Submissions::find()
                .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
                .filter(SubmissionColumn::DeletedAt.is_null())
                .select_only()
                .column(SubmissionColumn::Id)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    AssignHubError::database_operation(format!("查询作业提交失败: {e}"))
                })?;
            select = select.filter(Column::SubmissionId.is_in(submission_ids));
        }

        if let Some(published) = query.published {
            select = select.filter(Column::IsPublished.eq(published));
        }

        select = select.order_by_desc(Column::GradedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询评分总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询评分页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询评分列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
