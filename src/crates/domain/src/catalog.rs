use super::value::ResourceRef;
use async_trait::async_trait;
use thiserror::Error;

pub const DEFAULT_LANGUAGE: &str = "普通话";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0} not found: {1}")]
    ResourceNotFound(String, String),
    #[error("invalid catalog data: {0}")]
    InvalidSeed(String),
    #[error("{0}")]
    DbErr(String),
}

impl CatalogError {
    pub fn not_found(resource: &ResourceRef) -> Self {
        CatalogError::ResourceNotFound(resource.kind.to_string(), resource.id.clone())
    }
}

/// 专辑，目录数据，只读
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: String,
    pub name_cn: String,
    pub name_en: String,
    pub release_date: String,
    pub cover_url: String,
    pub album_detail: String,
    pub creation_background: String,
    pub awards: Vec<String>,
    pub language: String,
    pub record_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: String,
    pub album_id: String,
    pub track_number: i32,
    pub name_cn: String,
    pub name_en: Option<String>,
    pub lyricist: String,
    pub composer: String,
    pub arranger: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Single {
    pub id: String,
    pub name_cn: String,
    pub release_date: String,
    pub description: Option<String>,
}

/// 一次完整的目录导入数据
#[derive(Debug, Clone, Default)]
pub struct CatalogSeed {
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub singles: Vec<Single>,
}

impl CatalogSeed {
    /// 主键不能为空、不能重复
    pub fn validate(&self) -> Result<(), CatalogError> {
        fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a String>) -> Result<(), CatalogError> {
            let mut seen = std::collections::HashSet::new();
            for id in ids {
                if id.trim().is_empty() {
                    return Err(CatalogError::InvalidSeed(format!("{} with empty id", kind)));
                }
                if !seen.insert(id.as_str()) {
                    return Err(CatalogError::InvalidSeed(format!("duplicated {} id {}", kind, id)));
                }
            }
            Ok(())
        }
        check_ids("album", self.albums.iter().map(|a| &a.id))?;
        check_ids("song", self.songs.iter().map(|s| &s.id))?;
        check_ids("single", self.singles.iter().map(|s| &s.id))?;
        Ok(())
    }

    /// 引用了不存在专辑的歌曲
    pub fn orphan_songs(&self) -> Vec<&Song> {
        self.songs
            .iter()
            .filter(|s| !self.albums.iter().any(|a| a.id == s.album_id))
            .collect()
    }
}

/// 导入结果统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub deleted_albums: u64,
    pub deleted_songs: u64,
    pub deleted_singles: u64,
    pub albums: u64,
    pub songs: u64,
    pub singles: u64,
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// 资源（歌曲或单曲）是否存在
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, CatalogError>;

    /// 清空并重新写入专辑、歌曲、单曲三张表，不触碰用户数据
    async fn replace_all(&self, seed: &CatalogSeed) -> Result<SeedReport, CatalogError>;
}
