use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
    req: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    let (grade, class) = match storage.get_grade_with_class(grade_id).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradeNotFound,
                "评分不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let update = match core::grading::update(&actor, &class, &grade, req.score, req.feedback) {
        Ok(update) => update,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.apply_grade_update(update).await {
        Ok(Some(updated)) => {
            info!("Grade {} updated by instructor {}", grade_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "评分更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "评分不存在",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
