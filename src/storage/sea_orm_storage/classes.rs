//! 教学班存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::errors::{AssignHubError, Result};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建教学班
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            instructor_id: Set(req.instructor_id),
            semester: Set(req.semester),
            max_capacity: Set(req.max_capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取教学班
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教学班失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出教学班
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Classes::find().filter(Column::DeletedAt.is_null());

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }
        if let Some(ref semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教学班总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教学班页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询教学班列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新教学班（授课教师不可变更）
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(max_capacity) = update.max_capacity {
            model.max_capacity = Set(max_capacity);
        }

        model
            .update(&self.db)
            .await
            .map_err(AssignHubError::from)?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 软删除教学班
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Classes::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(class_id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("删除教学班失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 当前活跃选课数
    pub async fn count_active_enrollments_impl(&self, class_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .filter(EnrollmentColumn::IsActive.eq(true))
            .filter(EnrollmentColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("统计活跃选课失败: {e}")))?;

        Ok(count as i64)
    }

    /// 教学班依赖数量（活跃选课 + 作业），删除限制用
    pub async fn count_class_dependents_impl(&self, class_id: i64) -> Result<i64> {
        let enrollments = self.count_active_enrollments_impl(class_id).await?;

        let assignments = Assignments::find()
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .filter(AssignmentColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("统计作业数量失败: {e}")))?;

        Ok(enrollments + assignments as i64)
    }
}
