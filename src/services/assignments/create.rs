use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::core::assignments::AssignmentSpec;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "教学班不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "作业标题不能为空",
        )));
    }

    let spec = AssignmentSpec {
        title: req.title,
        description: req.description,
        kind: req.kind,
        max_score: req.max_score,
        due_date: req.due_date,
        allow_late_submission: req.allow_late_submission,
        allow_resubmission: req.allow_resubmission,
    };

    let draft = match core::assignments::create(&actor, &class, spec, chrono::Utc::now()) {
        Ok(draft) => draft,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.create_assignment(draft).await {
        Ok(assignment) => {
            info!(
                "Assignment '{}' created in class {} by instructor {}",
                assignment.title, class_id, actor.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
