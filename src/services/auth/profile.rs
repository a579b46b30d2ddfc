use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::auth::responses::UserInfoResponse;
use crate::services::unauthorized_response;

/// 当前登录用户信息
pub async fn profile(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(UserInfoResponse { user }, "查询成功"))),
        None => Ok(unauthorized_response()),
    }
}
