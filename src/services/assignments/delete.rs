use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    cascade: bool,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let class = match storage.get_class_by_id(assignment.class_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "教学班不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let live_submissions = match storage.count_live_submissions(assignment_id).await {
        Ok(n) => n,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let mode = match core::assignments::delete(&actor, &class, &assignment, live_submissions, cascade)
    {
        Ok(mode) => mode,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.delete_assignment(assignment_id, mode).await {
        Ok(true) => {
            info!(
                "Assignment {} deleted by instructor {} (mode: {:?})",
                assignment_id, actor.id, mode
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
