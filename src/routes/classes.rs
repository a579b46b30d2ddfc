use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest};
use crate::models::enrollments::requests::RosterQuery;
use crate::services::{ClassService, EnrollmentService};

// 懒加载的全局服务实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// 列出教学班
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassListQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

// 获取教学班详情
pub async fn get_class(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, path.into_inner()).await
}

// 创建教学班
pub async fn create_class(
    req: HttpRequest,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(&req, body.into_inner()).await
}

// 更新教学班
pub async fn update_class(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除教学班
pub async fn delete_class(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, path.into_inner()).await
}

// 选课
pub async fn enroll(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(&req, path.into_inner()).await
}

// 退课
pub async fn unenroll(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.unenroll(&req, path.into_inner()).await
}

// 教学班名册
pub async fn roster(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<RosterQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .roster(&req, path.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_classes))
            .route("", web::post().to(create_class))
            .route("/{id}", web::get().to(get_class))
            .route("/{id}", web::put().to(update_class))
            .route("/{id}", web::delete().to(delete_class))
            // 选课相关路由
            .route("/{id}/enrollments", web::post().to(enroll))
            .route("/{id}/enrollments", web::delete().to(unenroll))
            .route("/{id}/enrollments", web::get().to(roster))
            // 教学班下的作业创建
            .route(
                "/{id}/assignments",
                web::post().to(super::assignments::create_assignment),
            ),
    );
}
