//! Configuration management for Solace
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file with environment-variable overrides.
//! Backend settings are fixed for the lifetime of a session; the chat
//! shell reloads nothing mid-conversation.

use crate::backends::SamplingParams;
use crate::error::{Result, SolaceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Solace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend selection and per-backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Orchestrator tunables (history window, retry policy)
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

/// Backend configuration
///
/// Selects which backend variant to use and holds the settings for all
/// three, so a single file can describe every deployment and the `type`
/// field (or a CLI override) picks one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend kind to use: "local", "hosted", or "adapter"
    #[serde(rename = "type", default = "default_backend_kind")]
    pub kind: String,

    /// Local inference server settings
    #[serde(default)]
    pub local: LocalBackendConfig,

    /// Hosted chat-completion API settings
    #[serde(default)]
    pub hosted: HostedBackendConfig,

    /// In-process adapter settings
    #[serde(default)]
    pub adapter: AdapterConfig,

    /// Sampling parameters shared by all variants
    #[serde(default)]
    pub sampling: SamplingParams,
}

fn default_backend_kind() -> String {
    "local".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            local: LocalBackendConfig::default(),
            hosted: HostedBackendConfig::default(),
            adapter: AdapterConfig::default(),
            sampling: SamplingParams::default(),
        }
    }
}

/// Local inference server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalBackendConfig {
    /// Server base URL
    #[serde(default = "default_local_host")]
    pub host: String,

    /// Model identifier to generate with
    #[serde(default = "default_local_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_local_timeout")]
    pub timeout_seconds: u64,
}

fn default_local_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_local_model() -> String {
    "mistral:instruct".to_string()
}

fn default_local_timeout() -> u64 {
    60
}

impl Default for LocalBackendConfig {
    fn default() -> Self {
        Self {
            host: default_local_host(),
            model: default_local_model(),
            timeout_seconds: default_local_timeout(),
        }
    }
}

/// Hosted chat-completion API configuration
///
/// The API key is never stored in the file; `api_key_env` names the
/// environment variable to read it from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedBackendConfig {
    /// API base URL
    #[serde(default = "default_hosted_api_base")]
    pub api_base: String,

    /// Model identifier to request
    #[serde(default = "default_hosted_model")]
    pub model: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_hosted_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_hosted_timeout")]
    pub timeout_seconds: u64,
}

fn default_hosted_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_hosted_model() -> String {
    "mistralai/mistral-7b-instruct:free".to_string()
}

fn default_hosted_api_key_env() -> String {
    "SOLACE_API_KEY".to_string()
}

fn default_hosted_timeout() -> u64 {
    30
}

impl Default for HostedBackendConfig {
    fn default() -> Self {
        Self {
            api_base: default_hosted_api_base(),
            model: default_hosted_model(),
            api_key_env: default_hosted_api_key_env(),
            timeout_seconds: default_hosted_timeout(),
        }
    }
}

/// In-process adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Directory holding the fine-tuned adapter files
    #[serde(default = "default_adapter_path")]
    pub path: PathBuf,

    /// Model tag the adapter is registered under in the local runtime
    #[serde(default = "default_adapter_model")]
    pub model: String,

    /// Fall back to the hosted API when the adapter path fails
    #[serde(default = "default_adapter_fallback")]
    pub hosted_fallback: bool,
}

fn default_adapter_path() -> PathBuf {
    PathBuf::from("adapters/mental-health")
}

fn default_adapter_model() -> String {
    "mistral-mental-health".to_string()
}

fn default_adapter_fallback() -> bool {
    true
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            path: default_adapter_path(),
            model: default_adapter_model(),
            hosted_fallback: default_adapter_fallback(),
        }
    }
}

/// Orchestrator tunables
///
/// The source deployments disagreed on these numbers (retry counts of 0 and
/// 3, history windows of 3 and unbounded), so they are configuration rather
/// than constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Maximum turns of history included in the prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts, in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: u64,
}

fn default_history_window() -> usize {
    3
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            max_retries: default_max_retries(),
            retry_delay_seconds: default_retry_delay(),
        }
    }
}

impl OrchestratorConfig {
    /// The retry delay as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

impl Config {
    /// Load configuration from a file with environment overrides
    ///
    /// Falls back to defaults when the file does not exist, which keeps the
    /// zero-config local-server case working out of the box.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Environment beats file so containerized deployments can retarget a
    /// backend without editing the config.
    fn apply_env_vars(&mut self) {
        if let Ok(kind) = std::env::var("SOLACE_BACKEND") {
            tracing::debug!("Overriding backend kind from SOLACE_BACKEND: {}", kind);
            self.backend.kind = kind;
        }
        if let Ok(host) = std::env::var("SOLACE_LOCAL_HOST") {
            self.backend.local.host = host;
        }
        if let Ok(model) = std::env::var("SOLACE_LOCAL_MODEL") {
            self.backend.local.model = model;
        }
        if let Ok(api_base) = std::env::var("SOLACE_HOSTED_API_BASE") {
            self.backend.hosted.api_base = api_base;
        }
        if let Ok(model) = std::env::var("SOLACE_HOSTED_MODEL") {
            self.backend.hosted.model = model;
        }
        if let Ok(path) = std::env::var("SOLACE_ADAPTER_PATH") {
            self.backend.adapter.path = PathBuf::from(path);
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any value is outside its usable range
    pub fn validate(&self) -> Result<()> {
        match self.backend.kind.as_str() {
            "local" | "hosted" | "adapter" => {}
            other => {
                return Err(SolaceError::Config(format!(
                    "Unknown backend type: {} (expected local, hosted, or adapter)",
                    other
                ))
                .into());
            }
        }

        if self.orchestrator.history_window == 0 {
            return Err(
                SolaceError::Config("history_window must be at least 1".to_string()).into(),
            );
        }

        if self.backend.local.timeout_seconds == 0 || self.backend.hosted.timeout_seconds == 0 {
            return Err(
                SolaceError::Config("backend timeout_seconds must be at least 1".to_string())
                    .into(),
            );
        }

        let sampling = &self.backend.sampling;
        if !(0.0..=2.0).contains(&sampling.temperature) {
            return Err(SolaceError::Config(format!(
                "sampling temperature {} is outside 0.0..=2.0",
                sampling.temperature
            ))
            .into());
        }
        if !(0.0..=1.0).contains(&sampling.top_p) {
            return Err(SolaceError::Config(format!(
                "sampling top_p {} is outside 0.0..=1.0",
                sampling.top_p
            ))
            .into());
        }
        if sampling.max_tokens == 0 {
            return Err(
                SolaceError::Config("sampling max_tokens must be at least 1".to_string()).into(),
            );
        }

        Ok(())
    }
}
