use actix_web::HttpResponse;
use serde::Serialize;

/// 统一响应体 { code, msg, data }
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub msg: String,
    pub data: Option<T>,
}

pub fn success<T: Serialize>(msg: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        code: 200,
        msg: msg.to_string(),
        data: Some(data),
    })
}

pub fn success_empty(msg: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()> {
        code: 200,
        msg: msg.to_string(),
        data: None,
    })
}
