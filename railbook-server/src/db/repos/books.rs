//! Book repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::NewBook;
use super::DbError;

/// Book record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub price: Option<i64>,
    pub publish: Option<String>,
    pub published: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let now = Utc::now();
        let book = sqlx::query_as(
            r#"
            INSERT INTO books (isbn, title, price, publish, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, isbn, title, price, publish, published, created_at, updated_at
            "#,
        )
        .bind(book.isbn)
        .bind(book.title)
        .bind(book.price)
        .bind(book.publish)
        .bind(book.published)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(book)
    }

    /// Every book, by ascending id.
    pub async fn all(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as(
            r#"
            SELECT id, isbn, title, price, publish, published, created_at, updated_at
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }
}
