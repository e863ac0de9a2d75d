use crate::repository::postgres::command::db_data::{album, single, song};
use application::query::dao::CatalogDao;
use application::query::QueryError;
use async_trait::async_trait;
use domain::value::{ResourceKind, ResourceRef};
use model::catalog::{Album, Single, Song, SongWithAlbum};
use sea_orm::*;
use std::sync::Arc;

pub struct CatalogDaoImpl {
    db: Arc<DatabaseConnection>,
}

impl CatalogDaoImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
struct SongWithAlbumRow {
    pub id: String,
    pub album_id: String,
    pub track_number: i32,
    pub name_cn: String,
    pub name_en: Option<String>,
    pub duration: Option<String>,
    pub album_name: String,
    pub release_date: String,
}

impl From<SongWithAlbumRow> for SongWithAlbum {
    fn from(row: SongWithAlbumRow) -> Self {
        SongWithAlbum {
            id: row.id,
            album_id: row.album_id,
            track_number: row.track_number,
            name_cn: row.name_cn,
            name_en: row.name_en,
            duration: row.duration,
            album_name: row.album_name,
            release_date: row.release_date,
        }
    }
}

#[async_trait]
impl CatalogDao for CatalogDaoImpl {
    async fn list_albums(&self) -> Result<Vec<Album>, QueryError> {
        let models = album::Entity::find()
            .order_by_asc(album::Column::ReleaseDate)
            .order_by_asc(album::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(models.into_iter().map(Album::from).collect())
    }

    async fn get_album(&self, album_id: &str) -> Result<Option<Album>, QueryError> {
        let model = album::Entity::find_by_id(album_id.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(model.map(Album::from))
    }

    async fn list_album_songs(&self, album_id: &str) -> Result<Vec<Song>, QueryError> {
        let models = song::Entity::find()
            .filter(song::Column::AlbumId.eq(album_id))
            .order_by_asc(song::Column::TrackNumber)
            .all(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(models.into_iter().map(Song::from).collect())
    }

    async fn get_song(&self, song_id: &str) -> Result<Option<Song>, QueryError> {
        let model = song::Entity::find_by_id(song_id.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(model.map(Song::from))
    }

    async fn list_songs_with_album(&self) -> Result<Vec<SongWithAlbum>, QueryError> {
        let rows: Vec<SongWithAlbumRow> = SongWithAlbumRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT
                s.id, s.album_id, s.track_number, s.name_cn, s.name_en, s.duration,
                COALESCE(a.name_cn, '') AS album_name,
                COALESCE(a.release_date, '') AS release_date
            FROM song s
            LEFT JOIN album a ON a.id = s.album_id
            ORDER BY s.id
            "#,
        ))
        .all(self.db.as_ref())
        .await
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(SongWithAlbum::from).collect())
    }

    async fn list_singles(&self) -> Result<Vec<Single>, QueryError> {
        let models = single::Entity::find()
            .order_by_asc(single::Column::ReleaseDate)
            .order_by_asc(single::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(models.into_iter().map(Single::from).collect())
    }

    async fn get_single(&self, single_id: &str) -> Result<Option<Single>, QueryError> {
        let model = single::Entity::find_by_id(single_id.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(model.map(Single::from))
    }

    async fn exists(&self, resource: &ResourceRef) -> Result<bool, QueryError> {
        let count = match resource.kind {
            ResourceKind::Song => song::Entity::find_by_id(resource.id.clone())
                .count(self.db.as_ref())
                .await,
            ResourceKind::Single => single::Entity::find_by_id(resource.id.clone())
                .count(self.db.as_ref())
                .await,
        }
        .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok(count > 0)
    }
}
