use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, auth::requests::RegisterRequest};
use crate::services::storage_error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

/// 注册新用户
///
/// 开放注册只产生学生账号；教师与管理员账号由管理员通过用户管理接口创建。
/// 角色在注册时固定，之后不可变更。
pub async fn register(
    service: &AuthService,
    request: &HttpRequest,
    req: RegisterRequest,
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

    let password_hash = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let storage = service.get_storage(request);

    let create_request = CreateUserRequest {
        username: req.username,
        email: req.email,
        password: password_hash,
        role: UserRole::Student,
        display_name: req.display_name,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("New student registered: {}", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(
            ApiResponse::<()>::error_empty(ErrorCode::UserAlreadyExists, "用户名或邮箱已存在"),
        )),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
