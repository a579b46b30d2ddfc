use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};
use crate::storage::Storage;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let role = RequireJWT::extract_user_role(request);
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => return Ok(unauthorized_response()),
    };

    // 权限校验
    if let Err(resp) = check_class_create_permission(role, uid, &class_data, &storage).await {
        return Ok(resp);
    }

    if class_data.max_capacity <= 0 {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "容量上限必须为正数",
        )));
    }

    // 课程必须存在
    match storage.get_course_by_id(class_data.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e)),
    }

    // 创建教学班
    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} created by {}", class.id, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "教学班创建成功")))
        }
        Err(e) => {
            error!("Class creation failed: {}", e);
            Ok(storage_error_response(&e))
        }
    }
}

/// 权限校验辅助函数：管理员可为任意教师建班，教师只能为自己建班
async fn check_class_create_permission(
    role: Option<UserRole>,
    uid: i64,
    class_data: &CreateClassRequest,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match role {
        Some(UserRole::Admin) => match storage.get_user_by_id(class_data.instructor_id).await {
            Ok(Some(user)) => {
                if user.role != UserRole::Instructor {
                    return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::ClassPermissionDenied,
                        "教学班只能分配给教师账号",
                    )));
                }
            }
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "教师不存在",
                )));
            }
            Err(e) => {
                error!("Failed to get user by id: {}", e);
                return Err(storage_error_response(&e));
            }
        },
        Some(UserRole::Instructor) => {
            if class_data.instructor_id != uid {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassPermissionDenied,
                    "不能为其他教师创建教学班",
                )));
            }
        }
        _ => {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ClassPermissionDenied,
                "没有创建教学班的权限",
            )));
        }
    }
    Ok(())
}
