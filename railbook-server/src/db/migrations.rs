//! Schema migrations for the blog and hello tables
//!
//! Each migration runs once inside its own transaction and is recorded
//! by name in `schema_migrations`.

use chrono::Utc;
use sqlx::SqlitePool;

use super::repos::DbError;

/// One named schema step
pub struct Migration {
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// All migrations, in application order
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create_posts",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                title VARCHAR(255),
                body TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#],
    },
    Migration {
        // post_id is nullable and has no foreign key
        name: "create_comments",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                post_id INTEGER,
                comment VARCHAR(255),
                name VARCHAR(255),
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS index_comments_on_post_id ON comments (post_id)",
        ],
    },
    Migration {
        name: "create_books",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                isbn VARCHAR(255),
                title VARCHAR(255),
                price INTEGER,
                publish VARCHAR(255),
                published DATE,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#],
    },
];

/// Apply every pending migration. Returns the names applied by this call.
pub async fn run(pool: &SqlitePool) -> Result<Vec<&'static str>, DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            name VARCHAR(255) PRIMARY KEY NOT NULL,
            applied_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    let mut applied = Vec::new();

    for migration in MIGRATIONS {
        let mut tx = pool.begin().await?;

        let (done,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE name = ?)")
                .bind(migration.name)
                .fetch_one(&mut *tx)
                .await?;

        if done {
            continue;
        }

        tracing::info!(migration = migration.name, "applying migration");

        for statement in migration.statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query("INSERT INTO schema_migrations (name, applied_at) VALUES (?, ?)")
            .bind(migration.name)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        applied.push(migration.name);
    }

    if applied.is_empty() {
        tracing::debug!("schema is up to date");
    }

    Ok(applied)
}
