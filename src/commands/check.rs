//! Backend connectivity diagnostic
//!
//! Runs the same startup probe the chat shell uses and reports the result,
//! so deployments can verify a backend before pointing users at it. Exits
//! nonzero when the backend is unreachable.

use crate::backends::create_backend_with_override;
use crate::config::Config;
use crate::error::Result;
use crate::orchestrator::Orchestrator;

use colored::Colorize;

/// Probe the configured backend and report whether it is reachable
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `backend_override` - Optional backend kind override from the CLI
///
/// # Errors
///
/// Returns error when the backend cannot be constructed or the probe
/// exhausts its attempts
pub async fn run_check(config: Config, backend_override: Option<String>) -> Result<()> {
    let backend = create_backend_with_override(&config.backend, backend_override.as_deref(), None)?;
    let name = backend.name().to_string();

    let mut orchestrator = Orchestrator::new(
        backend,
        config.orchestrator.clone(),
        config.backend.sampling.clone(),
    );

    println!("Probing backend '{}'...", name);
    if orchestrator.probe().await {
        println!("{}", format!("Backend '{}' is ready.", name).green());
        Ok(())
    } else {
        println!("{}", format!("Backend '{}' is unavailable.", name).red());
        anyhow::bail!("backend '{}' did not answer the connectivity probe", name)
    }
}
