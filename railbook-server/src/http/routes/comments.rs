//! Comment endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Comment, CommentRepo, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::{NewComment, RecordId};

/// Create comment request
#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub comment: Option<String>,
    pub name: Option<String>,
}

/// Comment response
#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: Option<i64>,
    pub comment: Option<String>,
    pub name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            comment: c.comment,
            name: c.name,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

async fn require_post(state: &AppState, id: RecordId) -> Result<(), ApiError> {
    if PostRepo::new(&state.pool).exists(id.get()).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound {
            resource: "post",
            id: id.get().to_string(),
        })
    }
}

/// GET /posts/{id}/comments - comments of a post, oldest first
async fn list_comments(
    State(state): State<Arc<AppState>>,
    ValidId(post_id): ValidId,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    require_post(&state, post_id).await?;
    let comments = CommentRepo::new(&state.pool).list_for_post(post_id.get()).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// POST /posts/{id}/comments - add a comment to a post
async fn create_comment(
    State(state): State<Arc<AppState>>,
    ValidId(post_id): ValidId,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    require_post(&state, post_id).await?;

    let comment = CommentRepo::new(&state.pool)
        .create(NewComment::for_post(post_id.get(), req.comment, req.name))
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// DELETE /comments/{id}
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    CommentRepo::new(&state.pool).delete(id.get()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts/{id}/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", delete(delete_comment))
}
