//! Solace - empathetic-listener chat CLI
//!
//! Main entry point for the Solace application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solace::cli::{Cli, Commands};
use solace::commands;
use solace::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration
    let config = Config::load(&cli.config)?;
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { backend, model } => {
            if let Some(b) = &backend {
                tracing::debug!("Using backend override: {}", b);
            }
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }
            commands::chat::run_chat(config, backend, model).await
        }
        Commands::Check { backend } => commands::check::run_check(config, backend).await,
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "solace=debug" } else { "solace=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
