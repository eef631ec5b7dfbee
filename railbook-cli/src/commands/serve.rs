//! HTTP server command
//!
//! Runs the blog and hello routes on one listener.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use railbook_server::db::{create_pool, migrations};
use railbook_server::{run_server, AppConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (overrides config)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Skip running pending migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

impl ServeArgs {
    /// Fold command-line flags into the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    args.apply(&mut config);

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.url,
        "starting railbook server"
    );
    if config.app.author.is_none() {
        tracing::warn!("app.author is not set; /hello/app_var will return an error");
    }

    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    if !args.no_migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
