use crate::consts;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::HttpRequest;

/// 只允许配置中的来源跨域访问
pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

/// 客户端 IP：取连接对端地址；对端是受信任的反向代理时才采信转发头
pub fn client_ip(req: &HttpRequest, trusted_proxies: &[String]) -> String {
    let peer = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    if !trusted_proxies.iter().any(|p| *p == peer) {
        return peer;
    }

    if let Some(forwarded) = req.headers().get(consts::FORWARDED_FOR_HEADER) {
        if let Ok(s) = forwarded.to_str() {
            if let Some(ip) = s.split(',').next().map(str::trim).filter(|ip| !ip.is_empty()) {
                return ip.to_string();
            }
        }
    }

    if let Some(real_ip) = req.headers().get(consts::REAL_IP_HEADER) {
        if let Ok(s) = real_ip.to_str() {
            if !s.trim().is_empty() {
                return s.trim().to_string();
            }
        }
    }

    peer
}
