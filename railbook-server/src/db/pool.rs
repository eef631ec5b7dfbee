//! Database connection pool management
//!
//! Uses a sqlx `SqlitePool`. File databases are created on first use
//! and run in WAL mode; in-memory databases are pinned to a single
//! connection because every SQLite connection gets its own memory store.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// URL for a private in-memory database.
pub const MEMORY_URL: &str = "sqlite::memory:";

/// Create a SQLite connection pool.
///
/// # Arguments
///
/// * `database_url` - `sqlite://path/to/file.db` or `sqlite::memory:`
/// * `max_connections` - ignored for in-memory databases
///
/// # Errors
///
/// Returns an error if the URL is malformed or the file can't be opened.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = is_memory_url(database_url);

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        // Dropping the only connection would drop the database with it.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    tracing::debug!(url = %database_url, in_memory, "opening sqlite pool");
    pool_options.connect_with(options).await
}

/// Create a private in-memory pool (tests, demos).
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    create_pool(MEMORY_URL, 1).await
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
