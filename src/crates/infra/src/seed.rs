//! 曲库种子文件（JSON）的读取
use domain::catalog::{Album, CatalogError, CatalogSeed, Single, Song, DEFAULT_LANGUAGE};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    albums: Vec<AlbumRecord>,
    #[serde(default)]
    songs: Vec<SongRecord>,
    #[serde(default)]
    singles: Vec<SingleRecord>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Deserialize)]
struct AlbumRecord {
    id: String,
    name_cn: String,
    #[serde(default)]
    name_en: String,
    release_date: String,
    #[serde(default)]
    cover_url: String,
    #[serde(default)]
    album_detail: String,
    #[serde(default)]
    creation_background: String,
    #[serde(default)]
    awards: Vec<String>,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    record_label: String,
}

#[derive(Debug, Deserialize)]
struct SongRecord {
    id: String,
    album_id: String,
    track_number: i32,
    name_cn: String,
    name_en: Option<String>,
    #[serde(default)]
    lyricist: String,
    #[serde(default)]
    composer: String,
    arranger: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SingleRecord {
    id: String,
    name_cn: String,
    release_date: String,
    description: Option<String>,
}

impl From<SeedFile> for CatalogSeed {
    fn from(file: SeedFile) -> Self {
        CatalogSeed {
            albums: file
                .albums
                .into_iter()
                .map(|a| Album {
                    id: a.id,
                    name_cn: a.name_cn,
                    name_en: a.name_en,
                    release_date: a.release_date,
                    cover_url: a.cover_url,
                    album_detail: a.album_detail,
                    creation_background: a.creation_background,
                    awards: a.awards,
                    language: a.language,
                    record_label: a.record_label,
                })
                .collect(),
            songs: file
                .songs
                .into_iter()
                .map(|s| Song {
                    id: s.id,
                    album_id: s.album_id,
                    track_number: s.track_number,
                    name_cn: s.name_cn,
                    name_en: s.name_en,
                    lyricist: s.lyricist,
                    composer: s.composer,
                    arranger: s.arranger,
                    duration: s.duration,
                })
                .collect(),
            singles: file
                .singles
                .into_iter()
                .map(|s| Single {
                    id: s.id,
                    name_cn: s.name_cn,
                    release_date: s.release_date,
                    description: s.description,
                })
                .collect(),
        }
    }
}

pub fn parse_seed(json: &str) -> Result<CatalogSeed, CatalogError> {
    let file: SeedFile =
        serde_json::from_str(json).map_err(|e| CatalogError::InvalidSeed(e.to_string()))?;
    Ok(file.into())
}

pub fn load_seed(path: impl AsRef<Path>) -> Result<CatalogSeed, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::InvalidSeed(format!("{}: {}", path.display(), e)))?;
    parse_seed(&json)
}
