//! Tracing setup for the railbook CLI
//!
//! Usage:
//!   railbook --debug serve               # Debug logging to console
//!   RUST_LOG=railbook_server=debug ...   # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Default to debug level when RUST_LOG is not set
    pub debug: bool,
}

impl TracingConfig {
    /// Filter used when RUST_LOG is unset.
    pub fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info,sqlx=warn"
        }
    }
}

/// Initialize console tracing. RUST_LOG wins over `--debug`.
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
