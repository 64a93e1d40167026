//! Flowlog CLI binary.
//!
//! Provides command-line access to the reporting pipeline:
//! - Run a fetch/enrich/report cycle against a workflow platform
//! - List the configuration profiles found on this machine

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{handle_profiles_command, handle_run_command, Cli, Commands};

    // Pick up FLOWLOG_* credentials from a local .env during development
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the --verbose default
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Run(args) => {
            handle_run_command(args).await?;
        }

        Commands::Profiles => {
            handle_profiles_command()?;
        }
    }

    Ok(())
}
