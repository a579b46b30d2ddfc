use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

/// 撤回提交：仅限提交本人，且未评分
pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let grade = match storage.get_grade_by_submission_id(submission_id).await {
        Ok(g) => g,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    if let Err(rej) = core::submissions::delete(&actor, &submission, grade.as_ref()) {
        return Ok(rejection_response(&rej));
    }

    match storage.delete_submission(submission_id).await {
        Ok(true) => {
            info!("Student {} withdrew submission {}", actor.id, submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交已撤回")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
