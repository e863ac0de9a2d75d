use crate::query::dao::CatalogDao;
use crate::query::QueryError;
use model::catalog::{Album, Single, Song};
use std::sync::Arc;

#[derive(Clone)]
pub struct GetAlbumList {
    dao: Arc<dyn CatalogDao + Send + Sync>,
}

impl GetAlbumList {
    pub fn new(dao: Arc<dyn CatalogDao + Send + Sync>) -> Self {
        Self { dao }
    }

    pub async fn handle(&self) -> Result<Vec<Album>, QueryError> {
        self.dao.list_albums().await
    }
}

#[derive(Clone)]
pub struct GetAlbum {
    dao: Arc<dyn CatalogDao + Send + Sync>,
}

impl GetAlbum {
    pub fn new(dao: Arc<dyn CatalogDao + Send + Sync>) -> Self {
        Self { dao }
    }

    pub async fn handle(&self, album_id: &str) -> Result<Album, QueryError> {
        self.dao
            .get_album(album_id)
            .await?
            .ok_or_else(|| QueryError::NotFound("album not found".to_string()))
    }

    /// 专辑内歌曲；专辑不存在时返回空列表
    pub async fn songs(&self, album_id: &str) -> Result<Vec<Song>, QueryError> {
        self.dao.list_album_songs(album_id).await
    }
}

#[derive(Clone)]
pub struct GetSong {
    dao: Arc<dyn CatalogDao + Send + Sync>,
}

impl GetSong {
    pub fn new(dao: Arc<dyn CatalogDao + Send + Sync>) -> Self {
        Self { dao }
    }

    pub async fn handle(&self, song_id: &str) -> Result<Song, QueryError> {
        self.dao
            .get_song(song_id)
            .await?
            .ok_or_else(|| QueryError::NotFound("song not found".to_string()))
    }
}

#[derive(Clone)]
pub struct GetSingle {
    dao: Arc<dyn CatalogDao + Send + Sync>,
}

impl GetSingle {
    pub fn new(dao: Arc<dyn CatalogDao + Send + Sync>) -> Self {
        Self { dao }
    }

    pub async fn handle(&self, single_id: &str) -> Result<Single, QueryError> {
        self.dao
            .get_single(single_id)
            .await?
            .ok_or_else(|| QueryError::NotFound("single not found".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Single>, QueryError> {
        self.dao.list_singles().await
    }
}
