//! railbook-server: HTTP server for the blog and hello demo apps
//!
//! The blog side exposes posts and their comments backed by SQLite.
//! The hello side is a handful of fixed routes that render text, view
//! data, the book listing and a configuration value.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError};
pub use http::{build_router, run_server, AppState};
