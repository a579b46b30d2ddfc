//! 业务逻辑层
//!
//! 每个服务的写路径遵循同一套流程：认证取 Actor → 经存储层取实体快照 →
//! 调用 core 决策 → 持久化草稿 → 把结果或命名拒绝映射为 HTTP 响应。

pub mod assignments;
pub mod auth;
pub mod classes;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use files::FileService;
pub use grades::GradeService;
pub use submissions::SubmissionService;
pub use users::UserService;

use actix_web::HttpResponse;

use crate::core::{Rejection, RejectionKind};
use crate::models::{ApiResponse, ErrorCode};

/// 把 core 的命名拒绝映射为稳定的 HTTP 响应
///
/// 类别决定状态码（Forbidden→403、NotFound→404、Conflict→409、Invalid→422），
/// 具体变体决定业务错误码与提示语。
pub(crate) fn rejection_response(rejection: &Rejection) -> HttpResponse {
    let (code, message) = match rejection {
        Rejection::Forbidden => (ErrorCode::Forbidden, "没有执行该操作的权限"),
        Rejection::NotFound => (ErrorCode::NotFound, "资源不存在"),
        Rejection::CapacityExceeded => (ErrorCode::CapacityExceeded, "教学班容量已满"),
        Rejection::AlreadyEnrolled => (ErrorCode::AlreadyEnrolled, "已选过该教学班"),
        Rejection::NotEnrolled => (ErrorCode::NotEnrolled, "没有该教学班的活跃选课"),
        Rejection::DueDateNotInFuture => {
            (ErrorCode::DueDateNotInFuture, "截止时间必须晚于当前时间")
        }
        Rejection::MaxScoreOutOfRange => {
            (ErrorCode::MaxScoreOutOfRange, "作业满分超出允许范围")
        }
        Rejection::AssignmentHasSubmissions => (
            ErrorCode::AssignmentHasSubmissions,
            "作业已有提交，需显式级联删除",
        ),
        Rejection::AlreadySubmitted => {
            (ErrorCode::AlreadySubmitted, "已有有效提交，请使用重交接口")
        }
        Rejection::SubmissionClosed => {
            (ErrorCode::SubmissionClosed, "已过截止时间且不允许迟交")
        }
        Rejection::ResubmissionNotAllowed => {
            (ErrorCode::ResubmissionNotAllowed, "该作业不允许重交")
        }
        Rejection::CannotResubmitGradedWork => {
            (ErrorCode::CannotResubmitGradedWork, "已评分的提交不能重交")
        }
        Rejection::CannotDeleteGradedSubmission => (
            ErrorCode::CannotDeleteGradedSubmission,
            "已评分的提交不能撤回",
        ),
        Rejection::AlreadyGraded => (ErrorCode::AlreadyGraded, "该提交已有评分"),
        Rejection::ScoreOutOfRange => (ErrorCode::ScoreOutOfRange, "分数必须在 0-100 之间"),
        Rejection::GradeAlreadyPublished => {
            (ErrorCode::GradeAlreadyPublished, "已发布的评分不能修改")
        }
    };

    let body = ApiResponse::<()>::error_empty(code, message);
    match rejection.kind() {
        RejectionKind::Forbidden => HttpResponse::Forbidden().json(body),
        RejectionKind::NotFound => HttpResponse::NotFound().json(body),
        RejectionKind::Conflict => HttpResponse::Conflict().json(body),
        RejectionKind::Invalid => HttpResponse::UnprocessableEntity().json(body),
    }
}

/// 存储层失败的统一 500 响应（Unavailable 原样向上传播，不吞掉）
pub(crate) fn storage_error_response(e: &crate::errors::AssignHubError) -> HttpResponse {
    tracing::error!("Storage collaborator failed: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
        ErrorCode::InternalServerError,
        "存储服务暂时不可用",
    ))
}

/// 未认证请求的统一 401 响应
pub(crate) fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}
