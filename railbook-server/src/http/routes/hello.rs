//! Hello demo endpoints
//!
//! Four independent read-only actions under `/hello`.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::{Book, BookRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Body of `/hello/index`
pub const GREETING: &str = "こんにちは、世界！";

/// Message handed to the view by `/hello/view`
pub const VIEW_GREETING: &str = "こんにちは、世界！ (view)";

/// Template data for the hello view
#[derive(Debug, Serialize)]
pub struct ViewData {
    pub msg: &'static str,
}

/// Template data for the book list
#[derive(Serialize)]
pub struct BookList {
    pub books: Vec<BookResponse>,
}

/// Book response
#[derive(Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub price: Option<i64>,
    pub publish: Option<String>,
    pub published: Option<String>,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            isbn: b.isbn,
            title: b.title,
            price: b.price,
            publish: b.publish,
            published: b.published.map(|d| d.to_string()),
        }
    }
}

/// GET /hello/index - fixed greeting as plain text
async fn index() -> &'static str {
    GREETING
}

/// GET /hello/view - greeting as view data
async fn view() -> Json<ViewData> {
    Json(ViewData { msg: VIEW_GREETING })
}

/// GET /hello/list - every book
async fn list(State(state): State<Arc<AppState>>) -> Result<Json<BookList>, ApiError> {
    let books = BookRepo::new(&state.pool).all().await?;
    Ok(Json(BookList {
        books: books.into_iter().map(BookResponse::from).collect(),
    }))
}

/// GET /hello/app_var - configured author as plain text
async fn app_var(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    state
        .config
        .app
        .author
        .clone()
        .ok_or(ApiError::ConfigMissing { key: "author" })
}

/// Hello routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hello/index", get(index))
        .route("/hello/view", get(view))
        .route("/hello/list", get(list))
        .route("/hello/app_var", get(app_var))
}
