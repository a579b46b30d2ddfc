pub mod enroll;
pub mod roster;
pub mod unenroll;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::RosterQuery;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 选课
    pub async fn enroll(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, class_id).await
    }

    /// 退课
    pub async fn unenroll(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        unenroll::unenroll(self, request, class_id).await
    }

    /// 教学班名册
    pub async fn roster(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: RosterQuery,
    ) -> ActixResult<HttpResponse> {
        roster::roster(self, request, class_id, query).await
    }
}
