use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

/// 更新用户信息；角色注册后不可变更，请求里也没有这个字段
pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    mut req: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref email) = req.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if let Some(ref password) = req.password {
        if let Err(msg) = validate_password_simple(password) {
            return Ok(HttpResponse::UnprocessableEntity()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
        req.password = match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(storage_error_response(&e)),
        };
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, req).await {
        Ok(Some(user)) => {
            info!("User {} updated", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "用户更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(
            ApiResponse::<()>::error_empty(ErrorCode::UserAlreadyExists, "邮箱已被占用"),
        )),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
