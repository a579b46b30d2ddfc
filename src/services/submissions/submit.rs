use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::SubmissionService;
use crate::core::{self, Rejection, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn submit(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(req.assignment_id).await {
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

    // 文件引用必须已由文件存储层落盘；引用无效按硬拒绝处理，不产生半提交状态
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

    let enrollment = match storage.get_enrollment(actor.id, class.id).await {
        Ok(e) => e,
        Err(e) => return Ok(storage_error_response(&e)),
    };
    let existing = match storage.get_live_submission(assignment.id, actor.id).await {
        Ok(s) => s,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let draft = match core::submissions::submit(
        &actor,
        &class,
        &assignment,
        enrollment.as_ref(),
        existing.as_ref(),
        req.file_token,
        chrono::Utc::now(),
    ) {
        Ok(draft) => draft,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.apply_submission(draft).await {
        Ok(submission) => {
            info!(
                "Student {} submitted assignment {} (late: {})",
                actor.id, assignment.id, submission.is_late
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        // 并发重复提交：唯一约束兜底，按已提交报告
        Err(e) if e.is_conflict() => {
            warn!(
                "Concurrent duplicate submission for assignment {} by student {}",
                assignment.id, actor.id
            );
            Ok(rejection_response(&Rejection::AlreadySubmitted))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
