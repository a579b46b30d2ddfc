use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListQuery, PublishGradesRequest, UpdateGradeRequest,
};
use crate::services::GradeService;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 列出评分
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

// 创建评分
pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, body.into_inner()).await
}

// 更新评分
pub async fn update_grade(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(&req, path.into_inner(), body.into_inner())
        .await
}

// 批量发布评分
pub async fn publish_grades(
    req: HttpRequest,
    body: web::Json<PublishGradesRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.publish_grades(&req, body.into_inner()).await
}

// 获取某提交的评分
pub async fn get_submission_grade(
    req: HttpRequest,
    path: web::Path<i64>, // submission_id
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .get_submission_grade(&req, path.into_inner())
        .await
}

// 配置路由（提交维度的评分查询挂在 routes::submissions 的 scope 下）
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade))
            .route("/publish", web::post().to(publish_grades))
            .route("/{id}", web::put().to(update_grade)),
    );
}
