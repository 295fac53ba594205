//! Freshen CLI - shows what changed upstream for outdated checkouts.

mod commands;
mod config;
mod manifest;
mod mock;
mod progress;
mod render;
mod shutdown;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::render::OutputFormat;

#[derive(Parser)]
#[command(name = "freshen")]
#[command(version)]
#[command(about = "Explain the upstream commits your local checkouts are missing")]
#[command(
    long_about = "Freshen reads a manifest of locally checked-out repositories whose \
revision lags their remote, asks the matching code host for the commits in between, \
and prints them as each repository completes."
)]
#[command(after_long_help = r#"EXAMPLES
    Check every repository listed in a manifest:
        $ freshen check repos.toml

    Emit one JSON object per repository:
        $ freshen check repos.toml --format json

    Preview the output with canned data:
        $ freshen mock --delay-ms 200

    Generate shell completions:
        $ freshen completions bash > ~/.local/share/bash-completion/completions/freshen

CONFIGURATION
    Freshen reads configuration from:
      1. ~/.config/freshen/config.toml (or $XDG_CONFIG_HOME/freshen/config.toml)
      2. ./freshen.toml
      3. Environment variables (FRESHEN_* prefix, e.g., FRESHEN_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    FRESHEN_GITHUB_TOKEN          GitHub personal access token
    FRESHEN_GITHUB_API_URL        GitHub API base URL (default: https://api.github.com)
    FRESHEN_GITHUB_TIMEOUT_SECS   Per-request timeout (default: 30)
    FRESHEN_OUTPUT_FORMAT         text or json
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show pending upstream changes for repositories in a manifest
    Check {
        /// Manifest file (TOML with [[repo]] tables, or a .json array)
        manifest: PathBuf,

        /// Output format (default from config or text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Render canned presentations without touching the network
    Mock {
        /// Delay before each presentation, in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        delay_ms: u64,

        /// Output format (default from config or text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so rendered output on stdout stays clean.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("freshen=info,freshen_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(Term::stderr().is_term())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        commands::meta::handle_completions(*shell)?;
        return Ok(());
    }

    shutdown::setup_shutdown_handler();

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    match cli.command {
        Commands::Check { manifest, format } => {
            let format = format.unwrap_or(config.output.format);
            commands::check::handle_check(&manifest, format, &config).await?;
        }
        Commands::Mock { delay_ms, format } => {
            let format = format.unwrap_or(config.output.format);
            commands::mock::handle_mock(Duration::from_millis(delay_ms), format).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
