use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::core::{Action, Actor, authorize};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};

/// 删除教学班：仅管理员，且要求无活跃选课与作业
pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    if authorize(&actor, &Action::Administer).is_err() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以删除教学班",
        )));
    }

    match storage.count_class_dependents(class_id).await {
        Ok(0) => {}
        Ok(_) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassHasDependents,
                "教学班仍有选课或作业，不能删除",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    }

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted by admin {}", class_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教学班删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "教学班不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
