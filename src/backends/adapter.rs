//! In-process fine-tuned adapter backend
//!
//! The adapter variant serves a LoRA-style fine-tune: the adapter directory
//! is validated and its manifest loaded at construction, and generation runs
//! through the local runtime under the model tag the adapter is registered
//! as. When a hosted fallback is configured, generation failures on the
//! adapter path fall through to the hosted API instead of failing the
//! attempt, so a broken local deployment degrades rather than going silent.
//!
//! This is the only backend that can fail with `ModelLoad`.

use crate::backends::{
    Backend, BackendError, BackendResult, HostedApiBackend, LocalServerBackend, SamplingParams,
};
use crate::config::{AdapterConfig, LocalBackendConfig};
use crate::error::Result;

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Manifest describing a fine-tuned adapter
///
/// Mirrors the `adapter_config.json` written by adapter training runs; only
/// the fields needed to identify the adapter are kept, everything else is
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AdapterManifest {
    /// The base model this adapter was trained on
    pub base_model_name_or_path: String,

    /// Adapter method, e.g. "LORA"
    #[serde(default)]
    pub peft_type: Option<String>,
}

impl AdapterManifest {
    /// Loads the manifest from an adapter directory
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ModelLoad`] when the manifest file is missing
    /// or cannot be parsed
    pub fn load(dir: &Path) -> BackendResult<Self> {
        let manifest_path = dir.join("adapter_config.json");
        let contents = std::fs::read_to_string(&manifest_path).map_err(|e| {
            BackendError::ModelLoad(format!(
                "cannot read {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            BackendError::ModelLoad(format!(
                "invalid manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })
    }
}

/// Backend serving a fine-tuned adapter
#[derive(Debug)]
pub struct AdapterBackend {
    manifest: AdapterManifest,
    runtime: LocalServerBackend,
    fallback: Option<HostedApiBackend>,
}

impl AdapterBackend {
    /// Create a new adapter backend
    ///
    /// Loads the adapter manifest, then points a local-runtime client at the
    /// adapter's registered model tag.
    ///
    /// # Arguments
    ///
    /// * `config` - Adapter directory, model tag, and fallback flag
    /// * `local` - Host and timeout of the local runtime serving the adapter
    /// * `fallback` - Hosted client to fall back to, when configured
    ///
    /// # Errors
    ///
    /// Returns error if the manifest is missing or invalid (`ModelLoad`) or
    /// the HTTP client cannot be built
    pub fn new(
        config: AdapterConfig,
        local: &LocalBackendConfig,
        fallback: Option<HostedApiBackend>,
    ) -> Result<Self> {
        let manifest = AdapterManifest::load(&config.path)?;

        tracing::info!(
            "Loaded adapter from {}: base model {}, served as {}",
            config.path.display(),
            manifest.base_model_name_or_path,
            config.model
        );

        let runtime = LocalServerBackend::new(LocalBackendConfig {
            host: local.host.clone(),
            model: config.model,
            timeout_seconds: local.timeout_seconds,
        })?;

        Ok(Self {
            manifest,
            runtime,
            fallback,
        })
    }

    /// The base model the adapter was trained on
    pub fn base_model(&self) -> &str {
        &self.manifest.base_model_name_or_path
    }
}

#[async_trait]
impl Backend for AdapterBackend {
    fn name(&self) -> &str {
        "adapter"
    }

    async fn generate(&self, prompt: &str, params: &SamplingParams) -> BackendResult<String> {
        match self.runtime.generate(prompt, params).await {
            Ok(text) => Ok(text),
            Err(err) => match &self.fallback {
                Some(hosted) => {
                    tracing::warn!("Adapter generation failed ({}), using hosted fallback", err);
                    hosted.generate(prompt, params).await
                }
                None => Err(err),
            },
        }
    }

    async fn probe(&self) -> BackendResult<()> {
        match self.runtime.probe().await {
            Ok(()) => Ok(()),
            Err(err) => match &self.fallback {
                Some(hosted) => {
                    tracing::warn!("Adapter runtime unreachable ({}), probing fallback", err);
                    hosted.probe().await
                }
                None => Err(err),
            },
        }
    }
}
