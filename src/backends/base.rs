//! Base backend trait and common types
//!
//! This module defines the `Backend` trait that all inference backends
//! implement, the sampling parameters passed with every request, and the
//! tagged failure type the orchestrator's retry loop consumes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure returned by a backend dispatch
///
/// Every way a `generate` call can fail is one of these four cases. The
/// orchestrator matches on them explicitly to decide whether an attempt is
/// worth retrying and which user-facing string to fall back to.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend could not be reached at all
    #[error("could not reach backend: {0}")]
    Connectivity(String),

    /// The request exceeded the client timeout
    #[error("request timed out after {seconds} seconds")]
    Timeout {
        /// The timeout that was exceeded, in seconds
        seconds: u64,
    },

    /// The backend answered with a non-success status
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The fine-tuned adapter could not be loaded (adapter variant only)
    #[error("failed to load adapter model: {0}")]
    ModelLoad(String),
}

impl BackendError {
    /// Whether another attempt could plausibly succeed
    ///
    /// Connectivity, timeout, and status failures are transient; a missing
    /// or corrupt adapter will not fix itself between attempts.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::ModelLoad(_))
    }
}

/// Result type for backend dispatches
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Sampling parameters sent with every generation request
///
/// Set once at startup as part of the backend configuration and passed
/// unchanged for the lifetime of the session. Each backend maps these onto
/// its own wire fields (`options` for the local server, top-level fields
/// for the hosted API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Maximum number of tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Presence penalty (hosted API only)
    #[serde(default)]
    pub presence_penalty: f64,

    /// Frequency penalty (hosted API only)
    #[serde(default)]
    pub frequency_penalty: f64,

    /// Stop sequences cutting off generation
    #[serde(default = "default_stop")]
    pub stop: Vec<String>,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.9
}

fn default_max_tokens() -> u32 {
    512
}

fn default_stop() -> Vec<String> {
    vec!["[INST]".to_string(), "[/INST]".to_string()]
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            stop: default_stop(),
        }
    }
}

impl SamplingParams {
    /// Minimal parameters for a connectivity probe
    ///
    /// A probe only needs to prove the backend answers; one token is enough.
    pub fn probe() -> Self {
        Self {
            max_tokens: 1,
            ..Self::default()
        }
    }
}

/// Backend capability consumed by the orchestrator
///
/// All inference backends (hosted API, local server, in-process adapter)
/// implement this trait. `generate` takes the fully assembled instruction
/// payload and returns the raw reply text; the orchestrator owns retries
/// and whitespace trimming.
///
/// # Examples
///
/// ```no_run
/// use async_trait::async_trait;
/// use solace::backends::{Backend, BackendResult, SamplingParams};
///
/// #[derive(Debug)]
/// struct EchoBackend;
///
/// #[async_trait]
/// impl Backend for EchoBackend {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     async fn generate(&self, prompt: &str, _params: &SamplingParams) -> BackendResult<String> {
///         Ok(prompt.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Short name of the backend kind, for logs and banners
    fn name(&self) -> &str;

    /// Dispatches one generation request
    ///
    /// # Arguments
    ///
    /// * `prompt` - The assembled instruction payload
    /// * `params` - Sampling parameters for this request
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] describing the failure; the caller
    /// decides whether to retry.
    async fn generate(&self, prompt: &str, params: &SamplingParams) -> BackendResult<String>;

    /// Startup connectivity check
    ///
    /// The default implementation sends a minimal one-token generation and
    /// discards the reply, which is what the local server variant needs;
    /// backends with a cheaper health signal can override it.
    async fn probe(&self) -> BackendResult<()> {
        self.generate("test", &SamplingParams::probe())
            .await
            .map(|_| ())
    }
}
