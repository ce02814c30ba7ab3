mod commands;
mod config;
mod logging;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use logging::init_logging;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Optional YAML config file; environment variables take precedence
    #[arg(long, short, default_value = "idsboard.yaml", env = "IDSBOARD_CONFIG")]
    config: PathBuf,
}

#[derive(clap::Subcommand)]
pub(crate) enum Commands {
    /// Serve the dashboard API (default)
    Run,
    /// Validate the configuration
    Check,
    /// Query the health endpoint of a running instance
    Healthcheck,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => crate::commands::run::command(&cli).await,
        Commands::Check => crate::commands::check::command(&cli).await,
        Commands::Healthcheck => crate::commands::healthcheck::command(&cli).await,
    }
}
