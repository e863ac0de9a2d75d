use crate::query::dao::{CatalogDao, RatingDao};
use crate::query::QueryError;
use domain::value::ResourceKind;
use log::info;
use model::catalog::{ResourceItem, Single, Song, SongWithAlbum, UNKNOWN_ALBUM, UNKNOWN_TIME};
use model::pagination::PageRequest;
use model::rating::{RankedPage, Rated, RatingStats};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// 按平均分降序、评分人数降序排序，其余情况交给 tie_break
pub fn rank<T>(
    items: Vec<T>,
    stats_of: impl Fn(&T) -> RatingStats,
    tie_break: impl Fn(&T, &T) -> Ordering,
) -> Vec<Rated<T>> {
    let mut rated: Vec<Rated<T>> = items
        .into_iter()
        .map(|item| {
            let stats = stats_of(&item);
            Rated::new(item, RatingStats::new(stats.average_score, stats.rating_count))
        })
        .collect();
    rated.sort_by(|a, b| {
        b.average_score
            .total_cmp(&a.average_score)
            .then(b.rating_count.cmp(&a.rating_count))
            .then_with(|| tie_break(&a.item, &b.item))
    });
    rated
}

fn paginate<T>(rated: Vec<Rated<T>>, page: PageRequest) -> RankedPage<T> {
    let (items, pagination) = page.slice(rated);
    RankedPage { items, pagination }
}

fn lookup(stats: &HashMap<String, RatingStats>, id: &str) -> RatingStats {
    stats.get(id).copied().unwrap_or_default()
}

fn kind_order(kind: &str) -> u8 {
    match kind {
        "song" => 0,
        _ => 1,
    }
}

#[derive(Clone)]
pub struct RankByRating {
    catalog: Arc<dyn CatalogDao + Send + Sync>,
    ratings: Arc<dyn RatingDao + Send + Sync>,
}

impl RankByRating {
    pub fn new(
        catalog: Arc<dyn CatalogDao + Send + Sync>,
        ratings: Arc<dyn RatingDao + Send + Sync>,
    ) -> Self {
        Self { catalog, ratings }
    }

    pub async fn album_songs(
        &self,
        album_id: &str,
        page: PageRequest,
    ) -> Result<RankedPage<Song>, QueryError> {
        if self.catalog.get_album(album_id).await?.is_none() {
            return Err(QueryError::NotFound("album not found".to_string()));
        }
        let songs = self.catalog.list_album_songs(album_id).await?;
        let stats = self.ratings.get_stats_by_kind(ResourceKind::Song).await?;
        let rated = rank(
            songs,
            |s| lookup(&stats, &s.id),
            |a, b| a.track_number.cmp(&b.track_number),
        );
        info!("album {} songs ranked: {}", album_id, rated.len());
        Ok(paginate(rated, page))
    }

    pub async fn songs(&self, page: PageRequest) -> Result<RankedPage<SongWithAlbum>, QueryError> {
        let songs = self.songs_with_album().await?;
        let stats = self.ratings.get_stats_by_kind(ResourceKind::Song).await?;
        let rated = rank(songs, |s| lookup(&stats, &s.id), |a, b| a.id.cmp(&b.id));
        info!("songs ranked: {}", rated.len());
        Ok(paginate(rated, page))
    }

    pub async fn singles(&self, page: PageRequest) -> Result<RankedPage<Single>, QueryError> {
        let singles = self.catalog.list_singles().await?;
        let stats = self.ratings.get_stats_by_kind(ResourceKind::Single).await?;
        let rated = rank(
            singles,
            |s| lookup(&stats, &s.id),
            |a, b| a.release_date.cmp(&b.release_date).then(a.id.cmp(&b.id)),
        );
        info!("singles ranked: {}", rated.len());
        Ok(paginate(rated, page))
    }

    /// 歌曲与单曲合并排序，评分按 (id, type) 匹配
    pub async fn all_resources(
        &self,
        page: PageRequest,
    ) -> Result<RankedPage<ResourceItem>, QueryError> {
        let mut items: Vec<ResourceItem> = self
            .songs_with_album()
            .await?
            .into_iter()
            .map(ResourceItem::from)
            .collect();
        items.extend(
            self.catalog
                .list_singles()
                .await?
                .into_iter()
                .map(ResourceItem::from),
        );

        let song_stats = self.ratings.get_stats_by_kind(ResourceKind::Song).await?;
        let single_stats = self.ratings.get_stats_by_kind(ResourceKind::Single).await?;
        let rated = rank(
            items,
            |item| match kind_order(&item.kind) {
                0 => lookup(&song_stats, &item.id),
                _ => lookup(&single_stats, &item.id),
            },
            |a, b| {
                kind_order(&a.kind)
                    .cmp(&kind_order(&b.kind))
                    .then(a.id.cmp(&b.id))
            },
        );
        info!("all resources ranked: {}", rated.len());
        Ok(paginate(rated, page))
    }

    async fn songs_with_album(&self) -> Result<Vec<SongWithAlbum>, QueryError> {
        let mut songs = self.catalog.list_songs_with_album().await?;
        for song in songs.iter_mut() {
            if song.album_name.is_empty() {
                song.album_name = UNKNOWN_ALBUM.to_string();
            }
            if song.release_date.is_empty() {
                song.release_date = UNKNOWN_TIME.to_string();
            }
        }
        Ok(songs)
    }
}
