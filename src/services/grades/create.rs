use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::GradeService;
use crate::core::{self, Rejection, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    req: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(req.submission_id).await {
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

    let existing = match storage.get_grade_by_submission_id(submission.id).await {
        Ok(g) => g,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let draft = match core::grading::create(
        &actor,
        &class,
        &submission,
        existing.as_ref(),
        req.score,
        req.feedback,
        req.publish,
        chrono::Utc::now(),
    ) {
        Ok(draft) => draft,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.apply_grade(draft).await {
        Ok(grade) => {
            info!(
                "Submission {} graded by instructor {} (published: {})",
                submission.id, actor.id, grade.is_published
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "评分创建成功")))
        }
        // 并发重复评分：唯一约束兜底
        Err(e) if e.is_conflict() => {
            warn!(
                "Concurrent duplicate grade for submission {} by instructor {}",
                submission.id, actor.id
            );
            Ok(rejection_response(&Rejection::AlreadyGraded))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
