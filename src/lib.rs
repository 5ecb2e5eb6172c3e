//! Solace - empathetic-listener chat library
//!
//! This library provides the core functionality behind the Solace CLI:
//! a bounded conversational request orchestrator over interchangeable
//! inference backends.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: The Turn/Session conversation data model
//! - `prompt`: Persona instruction and bounded context assembly
//! - `backends`: Backend abstraction and implementations (local server,
//!   hosted API, in-process adapter)
//! - `orchestrator`: Probe state machine and the retrying `respond` call
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Chat and check command handlers
//!
//! # Example
//!
//! ```no_run
//! use solace::backends::create_backend;
//! use solace::config::Config;
//! use solace::orchestrator::Orchestrator;
//! use solace::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let backend = create_backend(&config.backend)?;
//!     let mut orchestrator = Orchestrator::new(
//!         backend,
//!         config.orchestrator.clone(),
//!         config.backend.sampling.clone(),
//!     );
//!
//!     if orchestrator.probe().await {
//!         let session = Session::new();
//!         let reply = orchestrator.respond(&session, "Hello").await;
//!         println!("{}", reply);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use backends::{Backend, BackendError, SamplingParams};
pub use config::Config;
pub use error::{Result, SolaceError};
pub use orchestrator::{BackendState, Orchestrator};
pub use session::{Role, Session, Turn};
