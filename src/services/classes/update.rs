use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::core::{Action, Actor, authorize};
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};

/// 更新教学班：管理员或该班授课教师
pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    req: UpdateClassRequest,
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

    let allowed = authorize(&actor, &Action::Administer).is_ok()
        || authorize(&actor, &Action::ManageAssignments { class: &class }).is_ok();
    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ClassPermissionDenied,
            "没有修改该教学班的权限",
        )));
    }

    if let Some(max_capacity) = req.max_capacity
        && max_capacity <= 0
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "容量上限必须为正数",
        )));
    }

    match storage.update_class(class_id, req).await {
        Ok(Some(updated)) => {
            info!("Class {} updated by {}", class_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "教学班更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "教学班不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
