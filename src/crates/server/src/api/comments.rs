use super::error::ApiError;
use super::extract::AuthUser;
use super::response::success;
use super::{resource_ref, PageQuery, ResourcePath};
use crate::AppState;
use actix_web::{web, HttpResponse};
use application::command::comment::{PostCommentCmd, ReplyCommentCmd};
use application::query::get_comments::{GetComments, DEFAULT_PAGE_SIZE};
use domain::comment::Comment;
use model::comment::{CommentSort, LikeState, PostedComment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub sort: Option<String>,
}

impl CommentListQuery {
    fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: u64,
}

fn posted(comment: Comment) -> PostedComment {
    PostedComment {
        comment_id: comment.id.as_i64(),
        resource_type: comment.resource.kind.to_string(),
        resource_id: comment.resource.id,
        username: comment.username,
        content: comment.content,
        parent_id: comment.parent_id.map(|id| id.as_i64()),
        reply_to_comment_id: comment.reply_to.as_ref().map(|t| t.comment_id.as_i64()),
        reply_to_username: comment.reply_to.map(|t| t.username),
        created_at: comment.created_at,
    }
}

pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<ResourcePath>,
    user: AuthUser,
    body: web::Json<CommentBody>,
) -> Result<HttpResponse, ApiError> {
    let resource = resource_ref(&path)?;
    let comment = state
        .comment_service()
        .post_comment(PostCommentCmd {
            resource,
            username: user.0,
            content: body.into_inner().content,
        })
        .await?;
    Ok(success("评论发布成功", posted(comment)))
}

pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<ResourcePath>,
    query: web::Query<CommentListQuery>,
    viewer: Option<AuthUser>,
) -> Result<HttpResponse, ApiError> {
    let resource = resource_ref(&path)?;
    let sort = CommentSort::parse(query.sort.as_deref())
        .ok_or_else(|| ApiError::BadRequest("sort must be latest or hot".to_string()))?;
    let page = GetComments::new(state.catalog_dao(), state.comment_dao())
        .handle(
            &resource,
            query.page_query().page_request(DEFAULT_PAGE_SIZE),
            sort,
            viewer.as_ref().map(|u| u.0.as_str()),
        )
        .await?;
    Ok(success("获取评论成功", page))
}

pub async fn reply(
    state: web::Data<AppState>,
    comment_id: web::Path<i64>,
    user: AuthUser,
    body: web::Json<CommentBody>,
) -> Result<HttpResponse, ApiError> {
    let reply = state
        .comment_service()
        .reply(ReplyCommentCmd {
            comment_id: comment_id.into_inner(),
            username: user.0,
            content: body.into_inner().content,
        })
        .await?;
    Ok(success("回复成功", posted(reply)))
}

pub async fn delete_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<i64>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let deleted = state
        .comment_service()
        .delete_comment(comment_id.into_inner(), &user.0)
        .await?;
    Ok(success("删除评论成功", Deleted { deleted }))
}

pub async fn like(
    state: web::Data<AppState>,
    comment_id: web::Path<i64>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let like_count = state
        .comment_service()
        .like(comment_id.into_inner(), &user.0)
        .await?;
    Ok(success(
        "点赞成功",
        LikeState {
            liked: true,
            like_count,
        },
    ))
}

pub async fn unlike(
    state: web::Data<AppState>,
    comment_id: web::Path<i64>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let like_count = state
        .comment_service()
        .unlike(comment_id.into_inner(), &user.0)
        .await?;
    Ok(success(
        "取消点赞成功",
        LikeState {
            liked: false,
            like_count,
        },
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/{kind:songs|singles}/{id}/comment", web::post().to(post_comment))
        .route("/{kind:songs|singles}/{id}/comments", web::get().to(list_comments))
        .route("/comments/{comment_id}/replies", web::post().to(reply))
        .route("/comments/{comment_id}", web::delete().to(delete_comment))
        .route("/comments/{comment_id}/like", web::post().to(like))
        .route("/comments/{comment_id}/like", web::delete().to(unlike));
}
