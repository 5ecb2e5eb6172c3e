//! Command-line interface definition for Solace
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and backend connectivity checks.

use clap::{Parser, Subcommand};

/// Solace - empathetic-listener chat over interchangeable inference backends
#[derive(Parser, Debug, Clone)]
#[command(name = "solace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Solace
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the backend from config (local, hosted, adapter)
        #[arg(short, long)]
        backend: Option<String>,

        /// Override the model identifier for the selected backend
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Probe the configured backend and report whether it is reachable
    Check {
        /// Override the backend from config (local, hosted, adapter)
        #[arg(short, long)]
        backend: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
