use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    req: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    if let Some(credit_hours) = req.credit_hours
        && (credit_hours <= 0 || credit_hours > 30)
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "学分必须在 1-30 之间",
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_course(course_id, req).await {
        Ok(Some(course)) => {
            info!("Course {} updated", course.code);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "课程不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
