use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::config::AppConfig;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

/// 用 cookie 里的 refresh token 换取新的 access token
pub async fn refresh_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let refresh_token = match JwtUtils::extract_refresh_token_from_cookie(request) {
        Some(token) => token,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "缺少 refresh token",
            )));
        }
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            let config = AppConfig::get();
            info!("Access token refreshed");
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RefreshTokenResponse {
                    access_token,
                    expires_in: config.jwt.access_token_expiry * 60,
                },
                "刷新成功",
            )))
        }
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "refresh token 无效或已过期",
            )))
        }
    }
}
