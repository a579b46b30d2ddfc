use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::AuthService;
use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::LoginResponse;
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

pub async fn login(
    service: &AuthService,
    request: &HttpRequest,
    req: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let user = match storage.get_user_by_username_or_email(&req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // 与密码错误返回相同的响应，避免枚举用户名
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidCredentials,
                "用户名或密码错误",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    if !verify_password(&req.password, &user.password_hash) {
        warn!("Failed login attempt for user {}", user.username);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::InvalidCredentials,
            "用户名或密码错误",
        )));
    }

    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserSuspended,
            "账号已被暂停",
        )));
    }

    let refresh_expiry = req
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));

    let token_pair = match user.generate_token_pair(refresh_expiry) {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Token generation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    "登录失败，请稍后再试",
                )),
            );
        }
    };

    if let Err(e) = storage.update_last_login(user.id).await {
        // 非关键路径，只记录
        warn!("Failed to update last login for {}: {}", user.id, e);
    }

    // 把用户信息写入缓存，后续请求的 JWT 校验可直接命中
    if let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        && let Ok(user_json) = serde_json::to_string(&user)
    {
        cache
            .insert_raw(
                format!("user:{}", token_pair.access_token),
                user_json,
                config.cache.default_ttl,
            )
            .await;
    }

    info!("User {} logged in", user.username);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_refresh_token_cookie(
            &token_pair.refresh_token,
        ))
        .json(ApiResponse::success(response, "登录成功")))
}
