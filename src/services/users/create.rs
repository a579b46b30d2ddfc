use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

/// 创建用户（路由层已用 RequireRole(Admin) 把关，可指定任意角色）
pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut req: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&req.username) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_email(&req.email) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    req.password = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let storage = service.get_storage(request);

    match storage.create_user(req).await {
        Ok(user) => {
            info!("User {} created with role {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "用户创建成功")))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(
            ApiResponse::<()>::error_empty(ErrorCode::UserAlreadyExists, "用户名或邮箱已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
