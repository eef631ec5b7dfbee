//! Post repository
//!
//! CRUD plus the title/body substring search.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::{NewPost, Pagination, Paginated, PostChanges};
use super::DbError;

/// Post record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated post.
    pub async fn create(&self, post: NewPost) -> Result<Post, DbError> {
        let now = Utc::now();
        let post: Post = sqlx::query_as(
            r#"
            INSERT INTO posts (title, body, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, body, created_at, updated_at
            "#,
        )
        .bind(post.title.as_str())
        .bind(post.body.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(post_id = post.id, "post created");
        Ok(post)
    }

    /// Get a single post by id.
    pub async fn get(&self, id: i64) -> Result<Post, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("post", id))
    }

    /// Whether a post with this id exists.
    pub async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// List posts, newest first.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Post>, DbError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;

        let items: Vec<Post> = sqlx::query_as(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(page.wrap(items, total))
    }

    /// Replace title and body of an existing post.
    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, DbError> {
        sqlx::query_as(
            r#"
            UPDATE posts
            SET title = ?, body = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, title, body, created_at, updated_at
            "#,
        )
        .bind(changes.title.as_str())
        .bind(changes.body.as_deref())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("post", id))
    }

    /// Delete a post. Its comments are left in place.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("post", id));
        }

        tracing::debug!(post_id = id, "post deleted");
        Ok(())
    }

    /// Posts whose title or body contains `q`.
    ///
    /// `q` is bound as `%q%` with LIKE wildcards escaped, so it always
    /// matches literally. Matching is SQLite `LIKE`: case-insensitive for
    /// ASCII, case-sensitive otherwise. Rows come back by ascending id.
    pub async fn title_or_body_matches(&self, q: &str) -> Result<Vec<Post>, DbError> {
        let pattern = like_pattern(q);

        let posts = sqlx::query_as(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM posts
            WHERE title LIKE ? ESCAPE '\' OR body LIKE ? ESCAPE '\'
            ORDER BY id ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }
}

/// Build a `%q%` LIKE pattern that matches `q` literally.
fn like_pattern(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_support::migrated_pool;

    fn new_post(title: &str, body: Option<&str>) -> NewPost {
        NewPost::new(title, body).unwrap()
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("foo"), "%foo%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[tokio::test]
    async fn create_and_get() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);

        let created = repo.create(new_post("Hello", Some("first body"))).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.body.as_deref(), Some("first body"));
        assert!(repo.exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = migrated_pool().await;
        let err = PostRepo::new(&pool).get(99).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "post", .. }));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        let post = repo.create(new_post("Draft", Some("old"))).await.unwrap();

        let updated = repo.update(post.id, new_post("Final", None)).await.unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.body, None);
        assert!(updated.updated_at >= post.updated_at);

        let err = repo.update(1234, new_post("Nope", None)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_then_missing() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        let post = repo.create(new_post("Gone soon", None)).await.unwrap();

        repo.delete(post.id).await.unwrap();
        assert!(!repo.exists(post.id).await.unwrap());
        assert!(matches!(repo.delete(post.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_is_paginated_newest_first() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        for title in ["one", "two", "three"] {
            repo.create(new_post(title, None)).await.unwrap();
        }

        let first = repo.list(Pagination::new(1, 2)).await.unwrap();
        assert_eq!(first.total, 3);
        assert_eq!(titles(&first.items), vec!["three", "two"]);

        let second = repo.list(Pagination::new(2, 2)).await.unwrap();
        assert_eq!(titles(&second.items), vec!["one"]);

        let past_end = repo.list(Pagination::new(5, 2)).await.unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 3);
    }

    #[tokio::test]
    async fn search_matches_title_substring() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        for title in ["foobar", "barfoo", "baz"] {
            repo.create(new_post(title, None)).await.unwrap();
        }

        let found = repo.title_or_body_matches("foo").await.unwrap();
        assert_eq!(titles(&found), vec!["foobar", "barfoo"]);
    }

    #[tokio::test]
    async fn search_matches_body_substring() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        repo.create(new_post("plain", Some("the quick fox"))).await.unwrap();
        repo.create(new_post("other", Some("lazy dog"))).await.unwrap();
        repo.create(new_post("untitled", None)).await.unwrap();

        let found = repo.title_or_body_matches("quick").await.unwrap();
        assert_eq!(titles(&found), vec!["plain"]);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        repo.create(new_post("50% off", None)).await.unwrap();
        repo.create(new_post("500 off", None)).await.unwrap();

        let found = repo.title_or_body_matches("0%").await.unwrap();
        assert_eq!(titles(&found), vec!["50% off"]);

        let found = repo.title_or_body_matches("_").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn search_ignores_ascii_case() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        repo.create(new_post("FooBar", None)).await.unwrap();

        let found = repo.title_or_body_matches("foo").await.unwrap();
        assert_eq!(titles(&found), vec!["FooBar"]);
    }

    #[tokio::test]
    async fn search_is_case_sensitive_outside_ascii() {
        let pool = migrated_pool().await;
        let repo = PostRepo::new(&pool);
        repo.create(new_post("Ärger", None)).await.unwrap();

        assert!(repo.title_or_body_matches("är").await.unwrap().is_empty());

        let found = repo.title_or_body_matches("Är").await.unwrap();
        assert_eq!(titles(&found), vec!["Ärger"]);
    }
}
