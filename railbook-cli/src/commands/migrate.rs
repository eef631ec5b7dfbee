//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use railbook_server::db::{create_pool, migrations};
use railbook_server::AppConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Apply pending migrations and report what ran.
pub async fn run_migrate(args: MigrateArgs, mut config: AppConfig) -> Result<()> {
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let pool = create_pool(&config.database.url, 1)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    let applied = migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    if applied.is_empty() {
        println!("Schema is up to date");
    } else {
        for name in applied {
            println!("Applied {}", name);
        }
    }

    pool.close().await;
    Ok(())
}
