use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::ResubmitRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn resubmit(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: ResubmitRequest,
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

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    // 新文件引用必须有效
    match storage.get_file_by_token(&req.file_token).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "文件引用无效，请先上传文件",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    }

    let grade = match storage.get_grade_by_submission_id(submission_id).await {
        Ok(g) => g,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let draft = match core::submissions::resubmit(
        &actor,
        &assignment,
        &submission,
        grade.as_ref(),
        req.file_token,
        chrono::Utc::now(),
    ) {
        Ok(draft) => draft,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.apply_resubmission(draft).await {
        Ok(Some(updated)) => {
            info!(
                "Student {} resubmitted submission {} (late: {})",
                actor.id, submission_id, updated.is_late
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "重交成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
