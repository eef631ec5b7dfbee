//! Post endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Post, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::{NewPost, Paginated, Pagination, PaginationParams, PostTitle, ValidationError};

/// Create/update post request
///
/// `title` is optional here so a missing title surfaces as a
/// validation error rather than a JSON rejection.
#[derive(Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostRequest {
    fn validate(self) -> Result<NewPost, ValidationError> {
        Ok(NewPost {
            title: PostTitle::required(self.title.as_deref())?,
            body: self.body,
        })
    }
}

/// Post response
#[derive(Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            body: p.body,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// `?q=` search parameters
#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /posts - list posts, newest first
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<PostResponse>>, ApiError> {
    let page = Pagination::from(params);
    let result = PostRepo::new(&state.pool).list(page).await?;
    Ok(Json(result.map(PostResponse::from)))
}

/// POST /posts - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let post = req.validate()?;
    let post = PostRepo::new(&state.pool).create(post).await?;
    tracing::info!(post_id = post.id, "created post");
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /posts/search?q= - posts whose title or body contains `q`
async fn search_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let q = params.q.ok_or(ValidationError::Empty { field: "q" })?;
    let posts = PostRepo::new(&state.pool).title_or_body_matches(&q).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /posts/{id} - get a single post
async fn get_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepo::new(&state.pool).get(id.get()).await?;
    Ok(Json(PostResponse::from(post)))
}

/// PUT /posts/{id} - replace title and body
async fn update_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Json(req): Json<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let changes = req.validate()?;
    let post = PostRepo::new(&state.pool).update(id.get(), changes).await?;
    Ok(Json(PostResponse::from(post)))
}

/// DELETE /posts/{id} - delete a post (comments are kept)
async fn delete_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    PostRepo::new(&state.pool).delete(id.get()).await?;
    tracing::info!(post_id = id.get(), "deleted post");
    Ok(StatusCode::NO_CONTENT)
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/search", get(search_posts))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::db::PostRepo;
    use crate::http::routes::test_support::{app, get_json, send_json};
    use crate::models::Pagination;

    #[tokio::test]
    async fn create_then_get() {
        let (app, _pool) = app().await;

        let (status, created) =
            send_json(&app, "POST", "/posts", json!({"title": "Hello", "body": "World"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "Hello");

        let uri = format!("/posts/{}", created["id"]);
        let (status, fetched) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn rejects_invalid_titles_without_saving() {
        let (app, pool) = app().await;

        for body in [
            json!({"body": "no title"}),
            json!({"title": "", "body": "empty title"}),
            json!({"title": "a".repeat(21)}),
        ] {
            let (status, error) = send_json(&app, "POST", "/posts", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error["error"], "validation_error");
            assert_eq!(error["field"], "title");
        }

        let stored = PostRepo::new(&pool).list(Pagination::default()).await.unwrap();
        assert_eq!(stored.total, 0);
    }

    #[tokio::test]
    async fn rejects_blank_title_without_saving() {
        let (app, pool) = app().await;

        let (status, error) = send_json(&app, "POST", "/posts", json!({"title": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["field"], "title");
        assert_eq!(error["message"], "title can't be blank");

        let stored = PostRepo::new(&pool).list(Pagination::default()).await.unwrap();
        assert_eq!(stored.total, 0);
    }

    #[tokio::test]
    async fn update_is_validated() {
        let (app, _pool) = app().await;
        let (_, created) = send_json(&app, "POST", "/posts", json!({"title": "Before"})).await;
        let uri = format!("/posts/{}", created["id"]);

        let (status, _) = send_json(&app, "PUT", &uri, json!({"title": "x".repeat(30)})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, unchanged) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unchanged["title"], "Before");

        let (status, updated) =
            send_json(&app, "PUT", &uri, json!({"title": "After", "body": "new"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "After");
        assert_eq!(updated["body"], "new");
    }

    #[tokio::test]
    async fn delete_then_404() {
        let (app, _pool) = app().await;
        let (_, created) = send_json(&app, "POST", "/posts", json!({"title": "Temp"})).await;
        let uri = format!("/posts/{}", created["id"]);

        let (status, _) = send_json(&app, "DELETE", &uri, json!({})).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, error) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], "not_found");
    }

    #[tokio::test]
    async fn bad_id_is_400() {
        let (app, _pool) = app().await;
        let (status, error) = get_json(&app, "/posts/zero").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["field"], "id");
    }

    #[tokio::test]
    async fn list_paginates() {
        let (app, _pool) = app().await;
        for n in 0..3 {
            send_json(&app, "POST", "/posts", json!({"title": format!("post {n}")})).await;
        }

        let (status, page) = get_json(&app, "/posts?page=1&per_page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 3);
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["items"][0]["title"], "post 2");
    }

    #[tokio::test]
    async fn search_by_substring() {
        let (app, _pool) = app().await;
        for title in ["foobar", "barfoo", "baz"] {
            send_json(&app, "POST", "/posts", json!({"title": title})).await;
        }

        let (status, found) = get_json(&app, "/posts/search?q=foo").await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = found
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["foobar", "barfoo"]);
    }

    #[tokio::test]
    async fn search_requires_q() {
        let (app, _pool) = app().await;
        let (status, error) = get_json(&app, "/posts/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["field"], "q");
    }
}
