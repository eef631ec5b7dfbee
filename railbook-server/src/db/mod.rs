//! Database layer - connection pool, migrations and repositories
//!
//! - SQLite through a sqlx pool, no shared `Connection` behind a mutex
//! - Every value reaches SQL as a bound parameter
//! - Repositories accept validated model types only

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
