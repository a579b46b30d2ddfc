use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::core::{Action, Actor, authorize};
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::responses::{SubmissionGradeInfo, SubmissionResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};
use crate::storage::Storage;
use std::sync::Arc;

/// 组装提交详情响应
///
/// 评分可见性：教师看全部；学生只看到已发布的评分。
async fn build_response(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    submission: Submission,
) -> Result<HttpResponse, HttpResponse> {
    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Err(storage_error_response(&e)),
    };

    let class = match storage.get_class_by_id(assignment.class_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "教学班不存在",
            )));
        }
        Err(e) => return Err(storage_error_response(&e)),
    };

    if authorize(
        actor,
        &Action::ViewSubmission {
            submission: &submission,
            class: &class,
        },
    )
    .is_err()
    {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该提交的权限",
        )));
    }

    let grade = match storage.get_grade_by_submission_id(submission.id).await {
        Ok(g) => g,
        Err(e) => return Err(storage_error_response(&e)),
    };

    let grade_info = grade
        .filter(|g| actor.role == UserRole::Instructor || g.is_published)
        .map(|g| SubmissionGradeInfo {
            score: g.score,
            feedback: g.feedback,
            graded_at: g.graded_at,
        });

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionResponse {
            submission,
            grade: grade_info,
        },
        "查询成功",
    )))
}

/// 获取提交详情
pub async fn get_submission(
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

    match build_response(&storage, &actor, submission).await {
        Ok(resp) | Err(resp) => Ok(resp),
    }
}

/// 获取我在某作业上的有效提交
pub async fn get_my_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let submission = match storage.get_live_submission(assignment_id, actor.id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "尚未提交该作业",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    match build_response(&storage, &actor, submission).await {
        Ok(resp) | Err(resp) => Ok(resp),
    }
}
