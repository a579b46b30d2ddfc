use std::sync::Arc;

use crate::core::assignments::{AssignmentChanges, AssignmentDraft, DeleteMode};
use crate::core::enrollment::EnrollmentDraft;
use crate::core::grading::{GradeDraft, GradeUpdate};
use crate::core::submissions::{ResubmissionDraft, SubmissionDraft};
use crate::models::{
    assignments::{
        entities::Assignment, requests::AssignmentListQuery, responses::AssignmentListResponse,
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{entities::Enrollment, requests::RosterQuery, responses::RosterResponse},
    files::entities::File,
    grades::{entities::Grade, requests::GradeListQuery, responses::GradeListResponse},
    submissions::{
        entities::Submission, requests::SubmissionListQuery, responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 持久化协作者契约
///
/// 约定（core 层据此假设）：
/// - 每个查询都已排除软删除行，"未找到"与"找到但无权限"是两种不同结果；
/// - 带不变量的写入（选课、提交、评分）在单个事务内完成复查与写入，
///   唯一约束冲突以 `AssignHubError::ConstraintConflict` 返回，
///   调用方把它映射为类型化的业务拒绝，不向外泄露原始存储错误。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息（角色不可变更）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 软删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 软删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 统计课程下的教学班数量（删除限制用）
    async fn count_classes_of_course(&self, course_id: i64) -> Result<i64>;

    /// 教学班管理方法
    // 创建教学班
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取教学班
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出教学班
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新教学班
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 软删除教学班
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 当前活跃选课数
    async fn count_active_enrollments(&self, class_id: i64) -> Result<i64>;
    // 教学班的依赖数量（活跃选课 + 作业），删除限制用
    async fn count_class_dependents(&self, class_id: i64) -> Result<i64>;

    /// 选课管理方法
    // 获取学生在某教学班的选课记录（活跃或历史）
    async fn get_enrollment(&self, student_id: i64, class_id: i64) -> Result<Option<Enrollment>>;
    // 执行选课草稿：事务内复查容量后插入或复活记录
    async fn apply_enrollment(
        &self,
        draft: EnrollmentDraft,
        max_capacity: i64,
    ) -> Result<Enrollment>;
    // 停用选课记录（退课）
    async fn deactivate_enrollment(&self, enrollment_id: i64) -> Result<bool>;
    // 教学班名册
    async fn list_roster_with_pagination(
        &self,
        class_id: i64,
        query: RosterQuery,
    ) -> Result<RosterResponse>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, draft: AssignmentDraft) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        changes: AssignmentChanges,
    ) -> Result<Option<Assignment>>;
    // 软删除作业（按决策的删除模式，必要时级联提交与评分）
    async fn delete_assignment(&self, assignment_id: i64, mode: DeleteMode) -> Result<bool>;
    // 作业下的有效提交数量
    async fn count_live_submissions(&self, assignment_id: i64) -> Result<i64>;

    /// 提交管理方法
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取学生在某作业上的有效提交
    async fn get_live_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 执行提交草稿：插入新记录，或复活该学生撤回过的历史记录
    async fn apply_submission(&self, draft: SubmissionDraft) -> Result<Submission>;
    // 执行重交草稿：原地更新既有记录
    async fn apply_resubmission(&self, draft: ResubmissionDraft) -> Result<Option<Submission>>;
    // 软删除提交（撤回），连带软删除其评分
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;

    /// 评分管理方法
    // 执行评分草稿
    async fn apply_grade(&self, draft: GradeDraft) -> Result<Grade>;
    // 通过ID获取评分
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    // 通过提交ID获取评分
    async fn get_grade_by_submission_id(&self, submission_id: i64) -> Result<Option<Grade>>;
    // 获取评分及其所属教学班（发布裁决用的所有权链）
    async fn get_grade_with_class(&self, grade_id: i64) -> Result<Option<(Grade, Class)>>;
    // 执行评分更新草稿
    async fn apply_grade_update(&self, update: GradeUpdate) -> Result<Option<Grade>>;
    // 批量置为已发布
    async fn publish_grades(
        &self,
        grade_ids: &[i64],
        published_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64>;
    // 列出评分
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;

    /// 文件管理方法
    // 登记上传文件
    async fn upload_file(
        &self,
        file_token: &str,
        file_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, file_token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
