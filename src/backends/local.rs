//! Local inference server backend
//!
//! Connects to a local or remote inference server (an Ollama-style
//! `/api/generate` endpoint) to produce completions. The instruction
//! payload is wrapped in the `[INST]…[/INST]` template the fine-tuned
//! models expect, with matching stop sequences sent in the options block.

use crate::backends::{Backend, BackendError, BackendResult, SamplingParams};
use crate::config::LocalBackendConfig;
use crate::error::{Result, SolaceError};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for a local inference server
///
/// # Examples
///
/// ```no_run
/// use solace::backends::{Backend, LocalServerBackend, SamplingParams};
/// use solace::config::LocalBackendConfig;
///
/// # async fn example() -> solace::error::Result<()> {
/// let backend = LocalServerBackend::new(LocalBackendConfig::default())?;
/// let reply = backend.generate("Hello!", &SamplingParams::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LocalServerBackend {
    client: Client,
    config: LocalBackendConfig,
}

/// Request structure for the `/api/generate` endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions<'a>,
}

/// Sampling options block of a generate request
#[derive(Debug, Serialize)]
struct GenerateOptions<'a> {
    temperature: f64,
    top_p: f64,
    num_predict: u32,
    stop: &'a [String],
}

/// Response structure from the `/api/generate` endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LocalServerBackend {
    /// Create a new local server backend
    ///
    /// # Arguments
    ///
    /// * `config` - Host, model, and timeout settings
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: LocalBackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("solace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SolaceError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized local backend: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Wraps the payload in the instruction template the model expects
    fn apply_template(prompt: &str) -> String {
        format!("[INST]{}[/INST]", prompt)
    }

    /// Maps a transport-level failure onto the backend error taxonomy
    fn map_request_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout {
                seconds: self.config.timeout_seconds,
            }
        } else {
            BackendError::Connectivity(err.to_string())
        }
    }
}

#[async_trait]
impl Backend for LocalServerBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn generate(&self, prompt: &str, params: &SamplingParams) -> BackendResult<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: Self::apply_template(prompt),
            stream: false,
            options: GenerateOptions {
                temperature: params.temperature,
                top_p: params.top_p,
                num_predict: params.max_tokens,
                stop: &params.stop,
            },
        };

        let url = format!("{}/api/generate", self.config.host);
        tracing::debug!("Dispatching generate request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Local backend request failed: {}", e);
                self.map_request_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Local backend returned {}: {}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse local backend response: {}", e);
            BackendError::Connectivity(format!("malformed response: {}", e))
        })?;

        Ok(parsed.response)
    }
}
