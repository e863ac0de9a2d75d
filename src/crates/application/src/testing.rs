//! 单元测试用的内存实现

use crate::auth::{PasswordHasher, TokenService, UserClaims};
use crate::command::shared::IdGenerator;
use crate::error::AppError;
use crate::query::dao::{CatalogDao, CommentDao, NotificationDao, RatingDao};
use crate::query::QueryError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use domain::catalog::{CatalogError, CatalogRepository, CatalogSeed, SeedReport};
use domain::comment::{Comment, CommentError, CommentLike, CommentRepository};
use domain::notification::{
    Notification, NotificationError, NotificationKind, NotificationRepository,
};
use domain::rating::{Rating, RatingError, RatingRepository};
use domain::user::{User, UserError, UserRepository};
use domain::value::{CommentId, NotificationId, ResourceKind, ResourceRef};
use model::catalog::{Album, Single, Song, SongWithAlbum};
use model::comment::{CommentSort, CommentView};
use model::notification::NotificationView;
use model::rating::RatingStats;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub fn at_minute(minute: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::minutes(minute)
}

#[derive(Default)]
pub struct SeqIdGenerator(AtomicI64);

#[async_trait]
impl IdGenerator for SeqIdGenerator {
    async fn next_id(&self) -> Result<i64, AppError> {
        Ok(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, plain: &str) -> Result<String, AppError> {
        Ok(format!("hashed:{}", plain))
    }

    fn verify(&self, pwd: &str, hashed_pwd: &str) -> Result<(), AppError> {
        if hashed_pwd == format!("hashed:{}", pwd) {
            Ok(())
        } else {
            Err(AppError::AuthError("password mismatch".to_string()))
        }
    }
}

pub struct EchoTokenService;

impl TokenService for EchoTokenService {
    fn issue(&self, claims: &UserClaims) -> Result<String, AppError> {
        Ok(format!("token:{}", claims.user_name))
    }

    fn verify(&self, token: &str) -> Result<UserClaims, AppError> {
        token
            .strip_prefix("token:")
            .map(|name| UserClaims {
                user_name: name.to_string(),
            })
            .ok_or_else(|| AppError::AuthError("invalid token".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username<'a>(&'a self, username: &'a str) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn save<'a>(&'a self, user: &User) -> Result<(), UserError> {
        self.users
            .lock()
            .unwrap()
            .insert(user.username.clone(), user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCatalogRepository {
    resources: Mutex<HashSet<ResourceRef>>,
}

impl InMemoryCatalogRepository {
    pub fn with(resources: &[ResourceRef]) -> Self {
        Self {
            resources: Mutex::new(resources.iter().cloned().collect()),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, CatalogError> {
        Ok(self.resources.lock().unwrap().contains(resource))
    }

    async fn replace_all(&self, seed: &CatalogSeed) -> Result<SeedReport, CatalogError> {
        let mut resources = self.resources.lock().unwrap();
        let deleted_songs = resources
            .iter()
            .filter(|r| r.kind == ResourceKind::Song)
            .count() as u64;
        let deleted_singles = resources.len() as u64 - deleted_songs;
        resources.clear();
        for song in &seed.songs {
            resources.insert(ResourceRef::new(ResourceKind::Song, &song.id));
        }
        for single in &seed.singles {
            resources.insert(ResourceRef::new(ResourceKind::Single, &single.id));
        }
        Ok(SeedReport {
            deleted_albums: 0,
            deleted_songs,
            deleted_singles,
            albums: seed.albums.len() as u64,
            songs: seed.songs.len() as u64,
            singles: seed.singles.len() as u64,
        })
    }
}

#[derive(Default)]
pub struct InMemoryRatingRepository {
    pub ratings: Mutex<Vec<Rating>>,
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn find(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<Option<Rating>, RatingError> {
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.resource == resource && r.username == username)
            .cloned())
    }

    async fn save(&self, rating: &Rating) -> Result<(), RatingError> {
        let mut ratings = self.ratings.lock().unwrap();
        ratings.retain(|r| !(r.resource == rating.resource && r.username == rating.username));
        ratings.push(rating.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn items(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    fn remove_linked(&self, comment_ids: &[CommentId]) {
        self.notifications
            .lock()
            .unwrap()
            .retain(|n| !comment_ids.contains(&n.comment_id));
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, NotificationError> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn insert(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn save(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut items = self.notifications.lock().unwrap();
        if let Some(existing) = items.iter_mut().find(|n| n.id == notification.id) {
            *existing = notification.clone();
        }
        Ok(())
    }

    async fn mark_all_read(&self, receiver: &str) -> Result<u64, NotificationError> {
        let mut updated = 0;
        for n in self
            .notifications
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|n| n.receiver == receiver && !n.read)
        {
            n.mark_read();
            updated += 1;
        }
        Ok(updated)
    }

    async fn withdraw(
        &self,
        kind: NotificationKind,
        comment_id: CommentId,
        sender: &str,
    ) -> Result<u64, NotificationError> {
        let mut items = self.notifications.lock().unwrap();
        let before = items.len();
        items.retain(|n| {
            !(n.kind == kind && n.comment_id == comment_id && n.sender == sender && !n.read)
        });
        Ok((before - items.len()) as u64)
    }
}

pub struct InMemoryCommentRepository {
    pub comments: Mutex<Vec<Comment>>,
    pub likes: Mutex<Vec<CommentLike>>,
    notifications: Arc<InMemoryNotificationRepository>,
}

impl InMemoryCommentRepository {
    pub fn new(notifications: Arc<InMemoryNotificationRepository>) -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            likes: Mutex::new(Vec::new()),
            notifications,
        }
    }

    fn set_like_count(&self, comment_id: CommentId, delta: i64) -> i64 {
        let mut comments = self.comments.lock().unwrap();
        match comments.iter_mut().find(|c| c.id == comment_id) {
            Some(c) => {
                c.like_count += delta;
                c.like_count
            }
            None => 0,
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert(&self, comment: &Comment) -> Result<(), CommentError> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn delete_cascade(&self, comment: &Comment) -> Result<u64, CommentError> {
        let mut comments = self.comments.lock().unwrap();
        let ids: Vec<CommentId> = comments
            .iter()
            .filter(|c| c.id == comment.id || (comment.is_root() && c.parent_id == Some(comment.id)))
            .map(|c| c.id)
            .collect();
        comments.retain(|c| !ids.contains(&c.id));
        self.likes
            .lock()
            .unwrap()
            .retain(|l| !ids.contains(&l.comment_id));
        self.notifications.remove_linked(&ids);
        Ok(ids.len() as u64)
    }

    async fn add_like(&self, like: &CommentLike) -> Result<i64, CommentError> {
        {
            let mut likes = self.likes.lock().unwrap();
            if likes
                .iter()
                .any(|l| l.comment_id == like.comment_id && l.username == like.username)
            {
                return Err(CommentError::AlreadyLiked);
            }
            likes.push(like.clone());
        }
        Ok(self.set_like_count(like.comment_id, 1))
    }

    async fn remove_like(&self, comment_id: CommentId, username: &str) -> Result<i64, CommentError> {
        {
            let mut likes = self.likes.lock().unwrap();
            let before = likes.len();
            likes.retain(|l| !(l.comment_id == comment_id && l.username == username));
            if likes.len() == before {
                return Err(CommentError::NotLiked);
            }
        }
        Ok(self.set_like_count(comment_id, -1))
    }
}

pub fn album(id: &str, release_date: &str) -> Album {
    Album {
        id: id.to_string(),
        name_cn: format!("专辑{}", id),
        name_en: format!("Album {}", id),
        release_date: release_date.to_string(),
        cover_url: String::new(),
        album_detail: String::new(),
        creation_background: String::new(),
        awards: vec![],
        language: "普通话".to_string(),
        record_label: String::new(),
    }
}

pub fn song(id: &str, album_id: &str, track_number: i32) -> Song {
    Song {
        id: id.to_string(),
        album_id: album_id.to_string(),
        track_number,
        name_cn: format!("歌曲{}", id),
        name_en: None,
        lyricist: "方文山".to_string(),
        composer: "周杰伦".to_string(),
        arranger: None,
        duration: Some("04:00".to_string()),
    }
}

pub fn single(id: &str, release_date: &str) -> Single {
    Single {
        id: id.to_string(),
        name_cn: format!("单曲{}", id),
        release_date: release_date.to_string(),
        description: None,
    }
}

#[derive(Default)]
pub struct InMemoryCatalogDao {
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub singles: Vec<Single>,
}

#[async_trait]
impl CatalogDao for InMemoryCatalogDao {
    async fn list_albums(&self) -> Result<Vec<Album>, QueryError> {
        let mut albums = self.albums.clone();
        albums.sort_by(|a, b| a.release_date.cmp(&b.release_date).then(a.id.cmp(&b.id)));
        Ok(albums)
    }

    async fn get_album(&self, album_id: &str) -> Result<Option<Album>, QueryError> {
        Ok(self.albums.iter().find(|a| a.id == album_id).cloned())
    }

    async fn list_album_songs(&self, album_id: &str) -> Result<Vec<Song>, QueryError> {
        let mut songs: Vec<Song> = self
            .songs
            .iter()
            .filter(|s| s.album_id == album_id)
            .cloned()
            .collect();
        songs.sort_by_key(|s| s.track_number);
        Ok(songs)
    }

    async fn get_song(&self, song_id: &str) -> Result<Option<Song>, QueryError> {
        Ok(self.songs.iter().find(|s| s.id == song_id).cloned())
    }

    async fn list_songs_with_album(&self) -> Result<Vec<SongWithAlbum>, QueryError> {
        Ok(self
            .songs
            .iter()
            .map(|s| {
                let album = self.albums.iter().find(|a| a.id == s.album_id);
                SongWithAlbum {
                    id: s.id.clone(),
                    album_id: s.album_id.clone(),
                    track_number: s.track_number,
                    name_cn: s.name_cn.clone(),
                    name_en: s.name_en.clone(),
                    duration: s.duration.clone(),
                    album_name: album.map(|a| a.name_cn.clone()).unwrap_or_default(),
                    release_date: album.map(|a| a.release_date.clone()).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn list_singles(&self) -> Result<Vec<Single>, QueryError> {
        let mut singles = self.singles.clone();
        singles.sort_by(|a, b| a.release_date.cmp(&b.release_date));
        Ok(singles)
    }

    async fn get_single(&self, single_id: &str) -> Result<Option<Single>, QueryError> {
        Ok(self.singles.iter().find(|s| s.id == single_id).cloned())
    }

    async fn exists(&self, resource: &ResourceRef) -> Result<bool, QueryError> {
        Ok(match resource.kind {
            ResourceKind::Song => self.songs.iter().any(|s| s.id == resource.id),
            ResourceKind::Single => self.singles.iter().any(|s| s.id == resource.id),
        })
    }
}

#[derive(Default)]
pub struct InMemoryRatingDao {
    ratings: Mutex<Vec<(ResourceRef, String, f64)>>,
}

impl InMemoryRatingDao {
    pub fn rate(&self, kind: ResourceKind, id: &str, username: &str, score: f64) {
        self.ratings
            .lock()
            .unwrap()
            .push((ResourceRef::new(kind, id), username.to_string(), score));
    }

    fn stats_where(&self, pred: impl Fn(&ResourceRef) -> bool) -> HashMap<String, RatingStats> {
        let mut sums: HashMap<String, (f64, i64)> = HashMap::new();
        for (resource, _, score) in self.ratings.lock().unwrap().iter() {
            if pred(resource) {
                let entry = sums.entry(resource.id.clone()).or_default();
                entry.0 += score;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(id, (sum, count))| {
                (
                    id,
                    RatingStats {
                        average_score: sum / count as f64,
                        rating_count: count,
                    },
                )
            })
            .collect()
    }
}

#[async_trait]
impl RatingDao for InMemoryRatingDao {
    async fn get_stats(&self, resource: &ResourceRef) -> Result<RatingStats, QueryError> {
        Ok(self
            .stats_where(|r| r == resource)
            .remove(&resource.id)
            .unwrap_or_default())
    }

    async fn get_stats_by_kind(
        &self,
        kind: ResourceKind,
    ) -> Result<HashMap<String, RatingStats>, QueryError> {
        Ok(self.stats_where(|r| r.kind == kind))
    }

    async fn get_user_score(
        &self,
        resource: &ResourceRef,
        username: &str,
    ) -> Result<Option<f64>, QueryError> {
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .find(|(r, u, _)| r == resource && u == username)
            .map(|(_, _, score)| *score))
    }
}

#[derive(Default)]
pub struct InMemoryCommentDao {
    comments: Mutex<Vec<(ResourceRef, CommentView)>>,
    likes: Mutex<HashSet<(i64, String)>>,
}

impl InMemoryCommentDao {
    pub fn add(&self, resource: &ResourceRef, id: i64, parent_id: Option<i64>, likes: i64, minute: i64) {
        let view = CommentView {
            id,
            resource_type: resource.kind.to_string(),
            resource_id: resource.id.clone(),
            username: format!("user{}", id),
            nickname: format!("user{}", id),
            avatar: None,
            content: format!("comment {}", id),
            parent_id,
            reply_to_comment_id: parent_id,
            reply_to_username: parent_id.map(|p| format!("user{}", p)),
            like_count: likes,
            liked: false,
            created_at: at_minute(minute),
        };
        self.comments.lock().unwrap().push((resource.clone(), view));
    }

    pub fn like(&self, comment_id: i64, username: &str) {
        self.likes
            .lock()
            .unwrap()
            .insert((comment_id, username.to_string()));
    }

    fn roots(&self, resource: &ResourceRef) -> Vec<CommentView> {
        self.comments
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, c)| r == resource && c.parent_id.is_none())
            .map(|(_, c)| c.clone())
            .collect()
    }
}

#[async_trait]
impl CommentDao for InMemoryCommentDao {
    async fn count_roots(&self, resource: &ResourceRef) -> Result<u64, QueryError> {
        Ok(self.roots(resource).len() as u64)
    }

    async fn list_roots(
        &self,
        resource: &ResourceRef,
        sort: CommentSort,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<CommentView>, QueryError> {
        let mut roots = self.roots(resource);
        roots.sort_by(|a, b| match sort {
            CommentSort::Latest => b.created_at.cmp(&a.created_at),
            CommentSort::Hot => b
                .like_count
                .cmp(&a.like_count)
                .then(b.created_at.cmp(&a.created_at)),
        });
        Ok(roots
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn list_replies(&self, root_ids: &[i64]) -> Result<Vec<CommentView>, QueryError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, c)| c.parent_id.is_some_and(|p| root_ids.contains(&p)))
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn liked_by(
        &self,
        username: &str,
        comment_ids: &[i64],
    ) -> Result<HashSet<i64>, QueryError> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, u)| u == username && comment_ids.contains(id))
            .map(|(id, _)| *id)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationDao {
    items: Mutex<Vec<(String, NotificationView)>>,
}

impl InMemoryNotificationDao {
    pub fn push(&self, id: i64, receiver: &str, kind: &str, read: bool, content: &str) {
        let view = NotificationView {
            id,
            kind: kind.to_string(),
            sender: "carol".to_string(),
            sender_nickname: "Carol".to_string(),
            sender_avatar: None,
            comment_id: 100 + id,
            comment_excerpt: content.to_string(),
            resource_type: "song".to_string(),
            resource_id: "s1".to_string(),
            read,
            created_at: at_minute(id),
        };
        self.items.lock().unwrap().push((receiver.to_string(), view));
    }

    fn matching(&self, receiver: &str, unread_only: bool) -> Vec<NotificationView> {
        let mut items: Vec<NotificationView> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, n)| r == receiver && (!unread_only || !n.read))
            .map(|(_, n)| n.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait]
impl NotificationDao for InMemoryNotificationDao {
    async fn count(&self, receiver: &str, unread_only: bool) -> Result<u64, QueryError> {
        Ok(self.matching(receiver, unread_only).len() as u64)
    }

    async fn list(
        &self,
        receiver: &str,
        unread_only: bool,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<NotificationView>, QueryError> {
        Ok(self
            .matching(receiver, unread_only)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
