//! Repository implementations for database access
//!
//! Each repository borrows the pool and maps rows to plain records.
//! Lookups that miss return `DbError::NotFound` instead of `Option`.

pub mod posts;
pub mod comments;
pub mod books;

pub use posts::{PostRepo, Post};
pub use comments::{CommentRepo, Comment};
pub use books::{BookRepo, Book};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
