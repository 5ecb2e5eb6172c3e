//! Hosted chat-completion API backend
//!
//! Connects to an OpenAI-compatible chat-completions endpoint with bearer
//! authentication. The orchestrator's single instruction payload is sent as
//! one user message; persona and context are already folded into it.

use crate::backends::{Backend, BackendError, BackendResult, SamplingParams};
use crate::config::HostedBackendConfig;
use crate::error::{Result, SolaceError};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for a hosted chat-completion API
///
/// The bearer token is read once at construction from the environment
/// variable named in the configuration and kept for the process lifetime.
#[derive(Debug)]
pub struct HostedApiBackend {
    client: Client,
    config: HostedBackendConfig,
    api_key: String,
}

/// Request structure for the `/chat/completions` endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    presence_penalty: f64,
    frequency_penalty: f64,
}

/// One message of a chat-completion request
#[derive(Debug, Serialize)]
struct ChatRequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response structure from the `/chat/completions` endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

/// Message body of a completion choice
#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl HostedApiBackend {
    /// Create a new hosted backend, reading the API key from the environment
    ///
    /// # Arguments
    ///
    /// * `config` - API base, model, key variable name, and timeout
    ///
    /// # Errors
    ///
    /// Returns error if the key variable is unset or the HTTP client cannot
    /// be built
    pub fn new(config: HostedBackendConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            SolaceError::MissingCredentials(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;

        Self::with_api_key(config, api_key)
    }

    /// Create a new hosted backend with an explicit API key
    pub fn with_api_key(config: HostedBackendConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("solace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SolaceError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized hosted backend: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
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
impl Backend for HostedApiBackend {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn generate(&self, prompt: &str, params: &SamplingParams) -> BackendResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatRequestMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            presence_penalty: params.presence_penalty,
            frequency_penalty: params.frequency_penalty,
        };

        let url = format!("{}/chat/completions", self.config.api_base);
        tracing::debug!("Dispatching chat completion to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Hosted backend request failed: {}", e);
                self.map_request_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Hosted backend returned {}: {}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse hosted backend response: {}", e);
            BackendError::Connectivity(format!("malformed response: {}", e))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            BackendError::Connectivity("malformed response: no choices".to_string())
        })?;

        Ok(choice.message.content)
    }
}
