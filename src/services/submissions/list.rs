use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::core::{Action, Actor, authorize};
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};

/// 列出提交
///
/// 学生只能列自己的提交；教师按作业列出所教教学班的提交。
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    mut query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    match actor.role {
        UserRole::Student => {
            // 学生视角强制只看自己的
            query.student_id = Some(actor.id);
        }
        UserRole::Instructor => {
            let Some(assignment_id) = query.assignment_id else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "缺少 assignment_id 查询参数",
                )));
            };

            let assignment = match storage.get_assignment_by_id(assignment_id).await {
                Ok(Some(a)) => a,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::AssignmentNotFound,
                        "作业不存在",
                    )));
                }
                Err(e) => return Ok(storage_error_response(&e)),
            };
            let class = match storage.get_class_by_id(assignment.class_id).await {
                Ok(Some(c)) => c,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::ClassNotFound,
                        "教学班不存在",
                    )));
                }
                Err(e) => return Ok(storage_error_response(&e)),
            };

            if authorize(&actor, &Action::ManageAssignments { class: &class }).is_err() {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "没有查看该作业提交的权限",
                )));
            }
        }
        UserRole::Admin => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "管理员不参与教学流程",
            )));
        }
    }

    match storage.list_submissions_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "查询成功"))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
