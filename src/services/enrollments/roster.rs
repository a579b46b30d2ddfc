use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::core::{Action, Actor, authorize};
use crate::middlewares::RequireJWT;
use crate::models::enrollments::requests::RosterQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};

/// 名册仅对管理员与该班授课教师可见
pub async fn roster(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    query: RosterQuery,
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
            ErrorCode::Forbidden,
            "没有查看名册的权限",
        )));
    }

    match storage.list_roster_with_pagination(class_id, query).await {
        Ok(roster) => Ok(HttpResponse::Ok().json(ApiResponse::success(roster, "查询成功"))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
