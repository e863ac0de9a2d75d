use serde::{Deserialize, Serialize};

pub const UNKNOWN_ALBUM: &str = "未知专辑";
pub const UNKNOWN_TIME: &str = "未知时间";
pub const UNKNOWN_DURATION: &str = "未知时长";
pub const SINGLE_ALBUM_NAME: &str = "单曲";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Single {
    pub id: String,
    pub name_cn: String,
    pub release_date: String,
    pub description: Option<String>,
}

/// 歌曲 + 所属专辑的名称与发行时间（全量歌曲排行用）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongWithAlbum {
    pub id: String,
    pub album_id: String,
    pub track_number: i32,
    pub name_cn: String,
    pub name_en: Option<String>,
    pub duration: Option<String>,
    pub album_name: String,
    pub release_date: String,
}

/// 歌曲与单曲合并后的统一资源条目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name_cn: String,
    pub album_name: String,
    pub release_date: String,
    pub duration: String,
}

impl From<SongWithAlbum> for ResourceItem {
    fn from(song: SongWithAlbum) -> Self {
        ResourceItem {
            id: song.id,
            kind: "song".to_string(),
            name_cn: song.name_cn,
            album_name: song.album_name,
            release_date: song.release_date,
            duration: song.duration.unwrap_or_else(|| UNKNOWN_DURATION.to_string()),
        }
    }
}

impl From<Single> for ResourceItem {
    fn from(single: Single) -> Self {
        ResourceItem {
            id: single.id,
            kind: "single".to_string(),
            name_cn: single.name_cn,
            album_name: SINGLE_ALBUM_NAME.to_string(),
            release_date: single.release_date,
            duration: UNKNOWN_DURATION.to_string(),
        }
    }
}
