use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate::validate_course_code;

/// 创建课程（路由层已用 RequireRole(Admin) 把关）
pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    req: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_course_code(&req.code) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if req.credit_hours <= 0 || req.credit_hours > 30 {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "学分必须在 1-30 之间",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_course(req).await {
        Ok(course) => {
            info!("Course {} created", course.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(
            ApiResponse::<()>::error_empty(ErrorCode::CourseCodeExists, "课程代码已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
