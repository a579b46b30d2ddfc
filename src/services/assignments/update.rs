use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::core::assignments::AssignmentChanges;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: UpdateAssignmentRequest,
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

    let changes = AssignmentChanges {
        title: req.title,
        description: req.description,
        max_score: req.max_score,
        due_date: req.due_date,
        allow_late_submission: req.allow_late_submission,
        allow_resubmission: req.allow_resubmission,
    };

    let changes = match core::assignments::update(
        &actor,
        &class,
        &assignment,
        changes,
        chrono::Utc::now(),
    ) {
        Ok(changes) => changes,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.update_assignment(assignment_id, changes).await {
        Ok(Some(updated)) => {
            info!("Assignment {} updated by instructor {}", assignment_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "作业更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
