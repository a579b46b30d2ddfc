use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::EnrollmentService;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{rejection_response, storage_error_response, unauthorized_response};

pub async fn enroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
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

    // 取快照：当前活跃选课数 + 该学生的既有记录
    let active = match storage.count_active_enrollments(class_id).await {
        Ok(n) => n,
        Err(e) => return Ok(storage_error_response(&e)),
    };
    let existing = match storage.get_enrollment(actor.id, class_id).await {
        Ok(e) => e,
        Err(e) => return Ok(storage_error_response(&e)),
    };

    let draft = match core::enrollment::enroll(
        &actor,
        &class,
        active,
        existing.as_ref(),
        chrono::Utc::now(),
    ) {
        Ok(draft) => draft,
        Err(rej) => return Ok(rejection_response(&rej)),
    };

    match storage.apply_enrollment(draft, class.max_capacity).await {
        Ok(enrollment) => {
            info!("Student {} enrolled in class {}", actor.id, class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "选课成功")))
        }
        Err(e) if e.is_conflict() => {
            // 并发竞争落败：重新取快照裁决一次，给出确定的拒绝原因
            warn!(
                "Enrollment write conflict for student {} in class {}, re-deciding",
                actor.id, class_id
            );
            let active = match storage.count_active_enrollments(class_id).await {
                Ok(n) => n,
                Err(e) => return Ok(storage_error_response(&e)),
            };
            let existing = match storage.get_enrollment(actor.id, class_id).await {
                Ok(e) => e,
                Err(e) => return Ok(storage_error_response(&e)),
            };
            match core::enrollment::enroll(
                &actor,
                &class,
                active,
                existing.as_ref(),
                chrono::Utc::now(),
            ) {
                Err(rej) => Ok(rejection_response(&rej)),
                // 复查仍然放行说明冲突已消解失败，按容量冲突报告
                Ok(_) => Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                    ErrorCode::CapacityExceeded,
                    "选课冲突，请重试",
                ))),
            }
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
