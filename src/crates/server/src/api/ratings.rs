use super::error::ApiError;
use super::extract::AuthUser;
use super::response::success;
use super::{resource_ref, ResourcePath};
use crate::AppState;
use actix_web::{web, HttpResponse};
use application::command::rating::SubmitRatingCmd;
use application::query::get_rating::GetRating;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RatingBody {
    pub score: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmitted {
    pub resource_type: String,
    pub resource_id: String,
    pub username: String,
    pub score: f64,
}

pub async fn submit_rating(
    state: web::Data<AppState>,
    path: web::Path<ResourcePath>,
    user: AuthUser,
    body: web::Json<RatingBody>,
) -> Result<HttpResponse, ApiError> {
    let resource = resource_ref(&path)?;
    let result = state
        .rating_service()
        .submit(SubmitRatingCmd {
            resource: resource.clone(),
            username: user.0.clone(),
            score: body.score,
        })
        .await?;
    let msg = if result.updated {
        "评分修改成功"
    } else {
        "评分提交成功"
    };
    Ok(success(
        msg,
        RatingSubmitted {
            resource_type: resource.kind.to_string(),
            resource_id: resource.id,
            username: user.0,
            score: result.score,
        },
    ))
}

pub async fn average(
    state: web::Data<AppState>,
    path: web::Path<ResourcePath>,
) -> Result<HttpResponse, ApiError> {
    let resource = resource_ref(&path)?;
    let stats = GetRating::new(state.rating_dao()).average(&resource).await?;
    Ok(success("获取平均分成功", stats))
}

pub async fn my_rating(
    state: web::Data<AppState>,
    path: web::Path<ResourcePath>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let resource = resource_ref(&path)?;
    let score = GetRating::new(state.rating_dao())
        .user_score(&resource, &user.0)
        .await?;
    Ok(success("获取用户评分成功", score))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/{kind:songs|singles}/{id}/rating", web::post().to(submit_rating))
        .route("/{kind:songs|singles}/{id}/rating/average", web::get().to(average))
        .route("/user/{kind:songs|singles}/{id}/rating", web::get().to(my_rating));
}

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::middleware::jwt_verify::JwtVerifier;
    use crate::testing;
    use actix_web::{test, App};
    use sea_orm::{DatabaseBackend, MockDatabase, Value as DbValue};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    #[actix_web::test]
    async fn test_average_rounds_to_one_decimal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            BTreeMap::from([
                ("average", DbValue::from(4.25f64)),
                ("total", DbValue::from(4i64)),
            ]),
        ]]);
        let app = test::init_service(
            App::new()
                .app_data(testing::state_with(db))
                .configure(api::configure),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/songs/s1/rating/average")
            .to_request();
        let rsp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rsp["data"], json!({"averageScore": 4.3, "ratingCount": 4}));
    }

    #[actix_web::test]
    async fn test_submit_requires_login() {
        let app = test::init_service(
            App::new()
                .app_data(testing::state())
                .wrap(JwtVerifier)
                .configure(api::configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/singles/x1/rating")
            .set_json(json!({"score": 4.5}))
            .to_request();
        let rsp = test::call_service(&app, req).await;
        assert_eq!(rsp.status(), 401);
        let body: Value = test::read_body_json(rsp).await;
        assert_eq!(body["msg"], "not logged in");
    }
}
