use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::core::{self, Rejection, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn unenroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let existing = match storage.get_enrollment(actor.id, class_id).await {
        Ok(e) => e,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let enrollment_id = match core::enrollment::unenroll(&actor, existing.as_ref()) {
        Ok(id) => id,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.deactivate_enrollment(enrollment_id).await {
        Ok(true) => {
            info!("Student {} unenrolled from class {}", actor.id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("退课成功")))
        }
        // 并发下已被停用：按未选课报告
        Ok(false) => Ok(rejection_response(&Rejection::NotEnrolled)),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
