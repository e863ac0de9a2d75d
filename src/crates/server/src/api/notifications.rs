use super::error::ApiError;
use super::extract::AuthUser;
use super::response::{success, success_empty};
use super::PageQuery;
use crate::AppState;
use actix_web::{web, HttpResponse};
use application::query::get_notifications::{GetNotifications, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub updated: u64,
}

pub async fn list(
    state: web::Data<AppState>,
    user: AuthUser,
    query: web::Query<NotificationQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .page_request(DEFAULT_PAGE_SIZE);
    let notifications = GetNotifications::new(state.notification_dao())
        .handle(&user.0, page, query.unread_only)
        .await?;
    Ok(success("获取通知成功", notifications))
}

pub async fn unread_count(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let count = GetNotifications::new(state.notification_dao())
        .unread_count(&user.0)
        .await?;
    Ok(success("获取未读通知数成功", count))
}

pub async fn mark_read(
    state: web::Data<AppState>,
    notification_id: web::Path<i64>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    state
        .notification_service()
        .mark_read(notification_id.into_inner(), &user.0)
        .await?;
    Ok(success_empty("已标记为已读"))
}

pub async fn mark_all_read(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let updated = state.notification_service().mark_all_read(&user.0).await?;
    Ok(success("全部标记为已读", Updated { updated }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(list))
        .route("/notifications/unread-count", web::get().to(unread_count))
        .route("/notifications/read-all", web::put().to(mark_all_read))
        .route("/notifications/{notification_id}/read", web::put().to(mark_read));
}

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::middleware::jwt_verify::JwtVerifier;
    use crate::testing;
    use actix_web::{test, App};
    use application::auth::{TokenService, UserClaims};
    use sea_orm::{DatabaseBackend, MockDatabase, Value as DbValue};
    use serde_json::Value;
    use std::collections::BTreeMap;

    #[actix_web::test]
    async fn test_unread_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            BTreeMap::from([("total", DbValue::from(2i64))]),
        ]]);
        let state = testing::state_with(db);
        let token = state
            .token_service()
            .issue(&UserClaims {
                user_name: "alice".into(),
            })
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .wrap(JwtVerifier)
                .configure(api::configure),
        )
        .await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/notifications/unread-count?token={}", token))
            .to_request();
        let rsp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rsp["code"], 200);
        assert_eq!(rsp["data"]["unreadCount"], 2);
    }

    #[actix_web::test]
    async fn test_list_requires_login() {
        let app = test::init_service(
            App::new()
                .app_data(testing::state())
                .wrap(JwtVerifier)
                .configure(api::configure),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/notifications")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let rsp = test::call_service(&app, req).await;
        assert_eq!(rsp.status(), 401);
        let body: Value = test::read_body_json(rsp).await;
        assert_eq!(body["msg"], "invalid token");
    }
}
