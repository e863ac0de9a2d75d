use super::db_data::album::{ActiveModel as AlbumActiveModel, Entity as AlbumEntity};
use super::db_data::single::{ActiveModel as SingleActiveModel, Entity as SingleEntity};
use super::db_data::song::{ActiveModel as SongActiveModel, Entity as SongEntity};
use async_trait::async_trait;
use domain::catalog::{CatalogError, CatalogRepository, CatalogSeed, SeedReport};
use domain::value::{ResourceKind, ResourceRef};
use sea_orm::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CatalogRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, CatalogError> {
        let count = match resource.kind {
            ResourceKind::Song => SongEntity::find_by_id(resource.id.clone())
                .count(self.db.as_ref())
                .await,
            ResourceKind::Single => SingleEntity::find_by_id(resource.id.clone())
                .count(self.db.as_ref())
                .await,
        }
        .map_err(|e| CatalogError::DbErr(e.to_string()))?;
        Ok(count > 0)
    }

    async fn replace_all(&self, seed: &CatalogSeed) -> Result<SeedReport, CatalogError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?;

        let deleted_songs = SongEntity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?
            .rows_affected;
        let deleted_albums = AlbumEntity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?
            .rows_affected;
        let deleted_singles = SingleEntity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?
            .rows_affected;

        if !seed.albums.is_empty() {
            let albums: Vec<AlbumActiveModel> = seed.albums.iter().map(|a| a.into()).collect();
            AlbumEntity::insert_many(albums)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| CatalogError::DbErr(e.to_string()))?;
        }
        if !seed.songs.is_empty() {
            let songs: Vec<SongActiveModel> = seed.songs.iter().map(|s| s.into()).collect();
            SongEntity::insert_many(songs)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| CatalogError::DbErr(e.to_string()))?;
        }
        if !seed.singles.is_empty() {
            let singles: Vec<SingleActiveModel> = seed.singles.iter().map(|s| s.into()).collect();
            SingleEntity::insert_many(singles)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| CatalogError::DbErr(e.to_string()))?;
        }

        // 写入后重新计数用于核对
        let albums = AlbumEntity::find()
            .count(&txn)
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?;
        let songs = SongEntity::find()
            .count(&txn)
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?;
        let singles = SingleEntity::find()
            .count(&txn)
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| CatalogError::DbErr(e.to_string()))?;

        Ok(SeedReport {
            deleted_albums,
            deleted_songs,
            deleted_singles,
            albums,
            songs,
            singles,
        })
    }
}
