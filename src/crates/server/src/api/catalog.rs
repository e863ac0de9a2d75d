use super::error::ApiError;
use super::response::success;
use super::PageQuery;
use crate::AppState;
use actix_web::{web, HttpResponse};
use application::query::get_catalog::{GetAlbum, GetAlbumList, GetSingle, GetSong};
use application::query::rank_by_rating::{RankByRating, DEFAULT_PAGE_SIZE};
use log::info;
use model::catalog::{ResourceItem, Single};
use model::pagination::Pagination;
use model::rating::{RankedPage, Rated};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RankedSongs<T: Serialize> {
    pub songs: Vec<Rated<T>>,
    pub pagination: Pagination,
}

impl<T: Serialize> From<RankedPage<T>> for RankedSongs<T> {
    fn from(page: RankedPage<T>) -> Self {
        Self {
            songs: page.items,
            pagination: page.pagination,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedSingles {
    pub singles: Vec<Rated<Single>>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct RankedResources {
    pub resources: Vec<Rated<ResourceItem>>,
    pub pagination: Pagination,
}

fn ranker(state: &AppState) -> RankByRating {
    RankByRating::new(state.catalog_dao(), state.rating_dao())
}

pub async fn list_albums(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let albums = GetAlbumList::new(state.catalog_dao()).handle().await?;
    info!("list albums: {}", albums.len());
    Ok(success("获取专辑成功", albums))
}

pub async fn get_album(
    state: web::Data<AppState>,
    album_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let album = GetAlbum::new(state.catalog_dao()).handle(&album_id).await?;
    Ok(success("获取专辑详情成功", album))
}

pub async fn list_album_songs(
    state: web::Data<AppState>,
    album_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let songs = GetAlbum::new(state.catalog_dao()).songs(&album_id).await?;
    info!("album {} songs: {}", album_id, songs.len());
    Ok(success("获取专辑歌曲成功", songs))
}

pub async fn album_songs_by_rating(
    state: web::Data<AppState>,
    album_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ranker(&state)
        .album_songs(&album_id, query.page_request(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(success(
        "获取专辑歌曲（按评分排序）成功",
        RankedSongs::from(page),
    ))
}

pub async fn songs_by_rating(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ranker(&state)
        .songs(query.page_request(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(success(
        "获取全量歌曲（按评分排序）成功",
        RankedSongs::from(page),
    ))
}

pub async fn get_song(
    state: web::Data<AppState>,
    song_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let song = GetSong::new(state.catalog_dao()).handle(&song_id).await?;
    Ok(success("获取歌曲详情成功", song))
}

pub async fn list_singles(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let singles = GetSingle::new(state.catalog_dao()).list().await?;
    Ok(success("获取单曲成功", singles))
}

pub async fn singles_by_rating(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ranker(&state)
        .singles(query.page_request(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(success(
        "获取全量单曲（按评分排序）成功",
        RankedSingles {
            singles: page.items,
            pagination: page.pagination,
        },
    ))
}

pub async fn get_single(
    state: web::Data<AppState>,
    single_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let single = GetSingle::new(state.catalog_dao()).handle(&single_id).await?;
    Ok(success("获取单曲详情成功", single))
}

pub async fn all_resources_by_rating(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = ranker(&state)
        .all_resources(query.page_request(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(success(
        "获取所有资源（歌曲+单曲）评分排序成功",
        RankedResources {
            resources: page.items,
            pagination: page.pagination,
        },
    ))
}

/// 固定路径（sort-by-rating）需先于 {id} 注册
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/albums", web::get().to(list_albums))
        .route("/albums/{album_id}", web::get().to(get_album))
        .route("/albums/{album_id}/songs", web::get().to(list_album_songs))
        .route(
            "/albums/{album_id}/songs/sort-by-rating",
            web::get().to(album_songs_by_rating),
        )
        .route("/songs/sort-by-rating", web::get().to(songs_by_rating))
        .route("/songs/{song_id}", web::get().to(get_song))
        .route("/singles", web::get().to(list_singles))
        .route("/singles/sort-by-rating", web::get().to(singles_by_rating))
        .route("/singles/{single_id}", web::get().to(get_single))
        .route(
            "/all-resources/sort-by-rating",
            web::get().to(all_resources_by_rating),
        );
}

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::testing;
    use actix_web::{test, App};
    use infra::repository::postgres::command::db_data::{single, song};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::Value;

    fn single_model(id: &str, name: &str, release_date: &str) -> single::Model {
        single::Model {
            id: id.to_string(),
            name_cn: name.to_string(),
            release_date: release_date.to_string(),
            description: None,
        }
    }

    #[actix_web::test]
    async fn test_list_singles() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            single_model("single_2023_08_16", "活该", "2023年8月16日"),
            single_model("single_2024_01_22", "星心", "2024年1月22日"),
        ]]);
        let app = test::init_service(
            App::new()
                .app_data(testing::state_with(db))
                .configure(api::configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/singles").to_request();
        let rsp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rsp["code"], 200);
        assert_eq!(rsp["data"].as_array().unwrap().len(), 2);
        assert_eq!(rsp["data"][0]["name_cn"], "活该");
    }

    #[actix_web::test]
    async fn test_unknown_song_is_404_envelope() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<song::Model>::new()]);
        let app = test::init_service(
            App::new()
                .app_data(testing::state_with(db))
                .configure(api::configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/songs/nope").to_request();
        let rsp = test::call_service(&app, req).await;
        assert_eq!(rsp.status(), 404);
        let body: Value = test::read_body_json(rsp).await;
        assert_eq!(body["code"], 404);
        assert_eq!(body["msg"], "song not found");
        assert_eq!(body["data"], Value::Null);
    }
}
