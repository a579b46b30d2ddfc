//! 选课存储操作
//!
//! 选课写入在单个事务内完成容量复查与插入/复活，(student_id, class_id)
//! 唯一约束兜底并发重复选课：并发竞争中后到的写入者以
//! ConstraintConflict 失败，由服务层重新取快照裁决一次。

use super::SeaOrmStorage;
use crate::core::enrollment::EnrollmentDraft;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users::Entity as Users;
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    enrollments::{
        entities::Enrollment,
        requests::RosterQuery,
        responses::{RosterItem, RosterResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取学生在某教学班的选课记录（活跃或历史）
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 执行选课草稿
    ///
    /// 事务内重新统计活跃选课数：并发抢占最后一个名额时，只有先提交的
    /// 事务能通过复查，后到者得到 ConstraintConflict。
    pub async fn apply_enrollment_impl(
        &self,
        draft: EnrollmentDraft,
        max_capacity: i64,
    ) -> Result<Enrollment> {
        let result = self
            .db
            .transaction::<_, crate::entity::enrollments::Model, AssignHubError>(move |txn| {
                Box::pin(async move {
                    let (class_id, now) = match &draft {
                        EnrollmentDraft::Create {
                            class_id,
                            enrolled_at,
                            ..
                        } => (*class_id, enrolled_at.timestamp()),
                        EnrollmentDraft::Reactivate {
                            enrollment_id,
                            enrolled_at,
                        } => {
                            let row = Enrollments::find_by_id(*enrollment_id)
                                .filter(Column::DeletedAt.is_null())
                                .one(txn)
                                .await?
                                .ok_or_else(|| {
                                    AssignHubError::not_found("选课记录不存在")
                                })?;
                            (row.class_id, enrolled_at.timestamp())
                        }
                    };

                    // 事务内复查容量
                    let active = Enrollments::find()
                        .filter(Column::ClassId.eq(class_id))
                        .filter(Column::IsActive.eq(true))
                        .filter(Column::DeletedAt.is_null())
                        .count(txn)
                        .await? as i64;

                    if active >= max_capacity {
                        return Err(AssignHubError::constraint_conflict(
                            "班级容量已满，选课写入被拒绝",
                        ));
                    }

                    let model = match draft {
                        EnrollmentDraft::Create {
                            class_id,
                            student_id,
                            ..
                        } => {
                            ActiveModel {
                                class_id: Set(class_id),
                                student_id: Set(student_id),
                                is_active: Set(true),
                                enrolled_at: Set(now),
                                updated_at: Set(now),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await?
                        }
                        EnrollmentDraft::Reactivate { enrollment_id, .. } => {
                            ActiveModel {
                                id: Set(enrollment_id),
                                is_active: Set(true),
                                enrolled_at: Set(now),
                                updated_at: Set(now),
                                ..Default::default()
                            }
                            .update(txn)
                            .await?
                        }
                    };

                    Ok(model)
                })
            })
            .await;

        match result {
            Ok(model) => Ok(model.into_enrollment()),
            Err(sea_orm::TransactionError::Connection(e)) => Err(e.into()),
            Err(sea_orm::TransactionError::Transaction(e)) => Err(e),
        }
    }

    /// 停用选课记录（退课），历史不删除
    pub async fn deactivate_enrollment_impl(&self, enrollment_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Enrollments::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(enrollment_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教学班名册（联表取学生信息）
    pub async fn list_roster_with_pagination_impl(
        &self,
        class_id: i64,
        query: RosterQuery,
    ) -> Result<RosterResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;
        let active_only = query.active_only.unwrap_or(true);

        let mut select = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::DeletedAt.is_null());

        if active_only {
            select = select.filter(Column::IsActive.eq(true));
        }

        let select = select
            .order_by_asc(Column::EnrolledAt)
            .find_also_related(Users);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询名册总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询名册页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询名册失败: {e}")))?;

        let items = rows
            .into_iter()
            .map(|(enrollment, user)| {
                let (username, display_name) = user
                    .map(|u| (u.username, u.display_name))
                    .unwrap_or_default();
                RosterItem {
                    enrollment: enrollment.into_enrollment(),
                    username,
                    display_name,
                }
            })
            .collect();

        Ok(RosterResponse {
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
