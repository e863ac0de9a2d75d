use crate::query::dao::{CatalogDao, CommentDao};
use crate::query::QueryError;
use domain::value::ResourceRef;
use log::info;
use model::comment::{assemble_threads, CommentPage, CommentSort};
use model::pagination::PageRequest;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Clone)]
pub struct GetComments {
    catalog: Arc<dyn CatalogDao + Send + Sync>,
    dao: Arc<dyn CommentDao + Send + Sync>,
}

impl GetComments {
    pub fn new(
        catalog: Arc<dyn CatalogDao + Send + Sync>,
        dao: Arc<dyn CommentDao + Send + Sync>,
    ) -> Self {
        Self { catalog, dao }
    }

    /// 一页顶层评论及其回复；viewer 为空时 liked 全部为 false
    pub async fn handle(
        &self,
        resource: &ResourceRef,
        page: PageRequest,
        sort: CommentSort,
        viewer: Option<&str>,
    ) -> Result<CommentPage, QueryError> {
        if !self.catalog.exists(resource).await? {
            return Err(QueryError::NotFound(format!("{} not found", resource.kind)));
        }

        let total = self.dao.count_roots(resource).await?;
        let mut roots = self
            .dao
            .list_roots(resource, sort, page.offset(), page.limit())
            .await?;
        let root_ids: Vec<i64> = roots.iter().map(|c| c.id).collect();
        let mut replies = if root_ids.is_empty() {
            Vec::new()
        } else {
            self.dao.list_replies(&root_ids).await?
        };

        if let Some(username) = viewer {
            let ids: Vec<i64> = roots.iter().chain(replies.iter()).map(|c| c.id).collect();
            if !ids.is_empty() {
                let liked = self.dao.liked_by(username, &ids).await?;
                for comment in roots.iter_mut().chain(replies.iter_mut()) {
                    comment.liked = liked.contains(&comment.id);
                }
            }
        }

        info!(
            "comments of {}: {} roots on page {}, {} replies, total {}",
            resource,
            roots.len(),
            page.page,
            replies.len(),
            total
        );

        Ok(CommentPage {
            comments: assemble_threads(roots, replies),
            pagination: page.pagination(total),
        })
    }
}
