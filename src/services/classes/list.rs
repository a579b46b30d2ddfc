use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::ClassListQuery;
use crate::services::storage_error_response;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "查询成功"))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
