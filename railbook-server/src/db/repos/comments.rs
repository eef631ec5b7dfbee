//! Comment repository
//!
//! Holds the post -> comments association.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::NewComment;
use super::DbError;

/// Comment record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: Option<i64>,
    pub comment: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a comment. The owning post is not checked here.
    pub async fn create(&self, comment: NewComment) -> Result<Comment, DbError> {
        let now = Utc::now();
        let comment: Comment = sqlx::query_as(
            r#"
            INSERT INTO comments (post_id, comment, name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, post_id, comment, name, created_at, updated_at
            "#,
        )
        .bind(comment.post_id)
        .bind(comment.comment)
        .bind(comment.name)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(comment_id = comment.id, post_id = ?comment.post_id, "comment created");
        Ok(comment)
    }

    /// All comments of a post, in insertion order.
    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DbError> {
        let comments = sqlx::query_as(
            r#"
            SELECT id, post_id, comment, name, created_at, updated_at
            FROM comments
            WHERE post_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn get(&self, id: i64) -> Result<Comment, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, post_id, comment, name, created_at, updated_at
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("comment", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("comment", id));
        }
        Ok(())
    }
}
