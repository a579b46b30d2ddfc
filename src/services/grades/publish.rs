use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::core::grading::GradeLookup;
use crate::core::{self, authorization::Actor};
use crate::middlewares::RequireJWT;
use crate::models::classes::entities::Class;
use crate::models::grades::entities::Grade;
use crate::models::grades::requests::PublishGradesRequest;
use crate::models::grades::responses::{PublishManifestEntry, PublishManifestResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, unauthorized_response};

const MAX_BATCH_SIZE: usize = 100;

/// 批量发布评分
///
/// 逐条独立裁决并在响应中逐条上报结果：不属于操作者的评分被跳过，
/// 不会导致整批失败。
pub async fn publish_grades(
    service: &GradeService,
    request: &HttpRequest,
    req: PublishGradesRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(u) => u,
        None => return Ok(unauthorized_response()),
    };
    let actor = Actor::from_user(&user);
    let storage = service.get_storage(request);

    if req.grade_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "grade_ids 不能为空",
        )));
    }
    if req.grade_ids.len() > MAX_BATCH_SIZE {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "单次最多发布 100 条评分",
        )));
    }

    // 逐条取所有权快照；查不到（含软删除）记 None
    let mut snapshots: Vec<(i64, Option<(Grade, Class)>)> =
        Vec::with_capacity(req.grade_ids.len());
    for grade_id in &req.grade_ids {
        match storage.get_grade_with_class(*grade_id).await {
            Ok(found) => snapshots.push((*grade_id, found)),
            Err(e) => return Ok(storage_error_response(&e)),
        }
    }

    let lookups: Vec<GradeLookup> = snapshots
        .iter()
        .map(|(grade_id, found)| GradeLookup {
            grade_id: *grade_id,
            found: found.as_ref().map(|(g, c)| (g, c)),
        })
        .collect();

    let manifest = core::grading::publish_grades(&actor, &lookups, chrono::Utc::now());

    if !manifest.to_publish.is_empty()
        && let Err(e) = storage
            .publish_grades(&manifest.to_publish, manifest.published_at)
            .await
    {
        return Ok(storage_error_response(&e));
    }

    let published = manifest.to_publish.len();
    let results: Vec<PublishManifestEntry> = manifest
        .entries
        .iter()
        .map(|(grade_id, outcome)| PublishManifestEntry {
            grade_id: *grade_id,
            outcome: outcome.as_str().to_string(),
        })
        .collect();
    let failed = results.len() - published;

    info!(
        "Instructor {} published {} grade(s), {} skipped",
        actor.id, published, failed
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PublishManifestResponse {
            results,
            published,
            failed,
        },
        "发布完成",
    )))
}
