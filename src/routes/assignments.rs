use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, DeleteAssignmentQuery, UpdateAssignmentRequest,
};
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 在教学班内创建作业
pub async fn create_assignment(
    req: HttpRequest,
    path: web::Path<i64>, // class_id
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, path.into_inner(), body.into_inner())
        .await
}

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, path.into_inner())
        .await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除作业（默认有提交时拒绝，?cascade=true 显式级联）
pub async fn delete_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<DeleteAssignmentQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, path.into_inner(), query.cascade)
        .await
}

// 配置路由
//
// 作业创建挂在教学班前缀下（见 routes::classes）；同一前缀只注册一个
// scope，避免前缀被先注册的 scope 吞掉。
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_assignments))
            .route("/{id}", web::get().to(get_assignment))
            .route("/{id}", web::put().to(update_assignment))
            .route("/{id}", web::delete().to(delete_assignment))
            .route(
                "/{id}/submissions/my",
                web::get().to(super::submissions::get_my_submission),
            ),
    );
}
