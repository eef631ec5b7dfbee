//! railbook CLI - runs the blog and hello demo apps
//!
//! - `serve`: HTTP server for posts, comments and the `/hello` routes
//! - `migrate`: apply pending schema migrations
//! - `completions`: shell completion scripts

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use railbook_server::AppConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "railbook",
    author,
    version,
    about = "Blog and hello-world demo apps over SQLite"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ./railbook.toml if present)
    #[arg(long, short = 'c', global = true, env = "RAILBOOK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Apply pending database migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = AppConfig::load(path.map(PathBuf::as_path)).context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => {
            let config = load_config(cli.config.as_ref())?;
            commands::run_serve(args, config).await?
        }
        Commands::Migrate(args) => {
            let config = load_config(cli.config.as_ref())?;
            commands::run_migrate(args, config).await?
        }
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}
