use crate::query::QueryError;
use async_trait::async_trait;
use domain::value::{ResourceKind, ResourceRef};
use model::catalog::{Album, Single, Song, SongWithAlbum};
use model::comment::{CommentSort, CommentView};
use model::notification::NotificationView;
use model::rating::RatingStats;
use std::collections::{HashMap, HashSet};

#[async_trait]
pub trait CatalogDao {
    /// 全部专辑，按发行时间、ID 升序
    async fn list_albums(&self) -> Result<Vec<Album>, QueryError>;
    async fn get_album(&self, album_id: &str) -> Result<Option<Album>, QueryError>;
    /// 专辑内歌曲，按曲目序号升序
    async fn list_album_songs(&self, album_id: &str) -> Result<Vec<Song>, QueryError>;
    async fn get_song(&self, song_id: &str) -> Result<Option<Song>, QueryError>;
    /// 全部歌曲，附带专辑名称与发行时间（专辑缺失时为空）
    async fn list_songs_with_album(&self) -> Result<Vec<SongWithAlbum>, QueryError>;
    /// 全部单曲，按发行时间升序
    async fn list_singles(&self) -> Result<Vec<Single>, QueryError>;
    async fn get_single(&self, single_id: &str) -> Result<Option<Single>, QueryError>;
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, QueryError>;
}

#[async_trait]
pub trait RatingDao {
    /// 单个资源的评分统计（未四舍五入的平均分）
    async fn get_stats(&self, resource: &ResourceRef) -> Result<RatingStats, QueryError>;
    /// 某类资源按 resource_id 分组的评分统计，未被评分的资源不在结果中
    async fn get_stats_by_kind(
        &self,
        kind: ResourceKind,
    ) -> Result<HashMap<String, RatingStats>, QueryError>;
    async fn get_user_score(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<Option<f64>, QueryError>;
}

#[async_trait]
pub trait CommentDao {
    async fn count_roots(&self, resource: &ResourceRef) -> Result<u64, QueryError>;
    /// 一页顶层评论，liked 一律为 false
    async fn list_roots(
        &self,
        resource: &ResourceRef,
        sort: CommentSort,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<CommentView>, QueryError>;
    /// 指定顶层评论下的全部回复
    async fn list_replies(&self, root_ids: &[i64]) -> Result<Vec<CommentView>, QueryError>;
    /// 给定评论中被该用户点过赞的 ID
    async fn liked_by(
        &self,
        username: &str,
        comment_ids: &[i64],
    ) -> Result<HashSet<i64>, QueryError>;
}

#[async_trait]
pub trait NotificationDao {
    async fn count(&self, receiver: &str, unread_only: bool) -> Result<u64, QueryError>;
    /// 最新优先；comment_excerpt 为评论全文
    async fn list(
        &self,
        receiver: &str,
        unread_only: bool,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<NotificationView>, QueryError>;
}
