use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, ResubmitRequest, SubmissionListQuery,
};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 提交作业
pub async fn submit(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.submit(&req, body.into_inner()).await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 重交作业
pub async fn resubmit(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ResubmitRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .resubmit(&req, path.into_inner(), body.into_inner())
        .await
}

// 撤回提交
pub async fn delete_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, path.into_inner())
        .await
}

// 获取我在某作业上的有效提交
pub async fn get_my_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_my_submission(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_submissions))
            .route("", web::post().to(submit))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}", web::put().to(resubmit))
            .route("/{id}", web::delete().to(delete_submission))
            .route(
                "/{id}/grade",
                web::get().to(super::grades::get_submission_grade),
            ),
    );
}
