pub mod catalog;
pub mod comments;
pub mod error;
pub mod extract;
pub mod notifications;
pub mod ratings;
pub mod response;

use crate::auth;
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use domain::value::{ResourceKind, ResourceRef};
use error::ApiError;
use model::pagination::PageRequest;
use response::success_empty;
use serde::Deserialize;

/// 分页参数 ?page=&pageSize=
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub fn page_request(&self, default_size: u64) -> PageRequest {
        PageRequest::new(self.page, self.page_size, default_size)
    }
}

/// /api/{songs|singles}/{id}/...
#[derive(Debug, Deserialize)]
pub struct ResourcePath {
    pub kind: String,
    pub id: String,
}

pub fn resource_ref(path: &ResourcePath) -> Result<ResourceRef, ApiError> {
    let kind = ResourceKind::from_segment(&path.kind)
        .ok_or_else(|| ApiError::NotFound(format!("unknown resource type: {}", path.kind)))?;
    Ok(ResourceRef::new(kind, &path.id))
}

fn json_error(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("invalid json body: {}", err)).into()
}

fn query_error(err: actix_web::error::QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("invalid query: {}", err)).into()
}

fn path_error(err: actix_web::error::PathError, _: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("invalid path: {}", err)).into()
}

async fn keepalive() -> HttpResponse {
    success_empty("ok")
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound("resource not found".to_string()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .route("/keepalive", web::get().to(keepalive))
        .service(
            web::scope("/api")
                .configure(auth::configure)
                .configure(catalog::configure)
                .configure(ratings::configure)
                .configure(comments::configure)
                .configure(notifications::configure),
        )
        .default_service(web::to(not_found));
}
