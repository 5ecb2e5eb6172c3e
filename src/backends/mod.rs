//! Backend module for Solace
//!
//! This module contains the inference backend abstraction and the three
//! interchangeable implementations: the local inference server, the hosted
//! chat-completion API, and the in-process fine-tuned adapter.

pub mod adapter;
pub mod base;
pub mod hosted;
pub mod local;

pub use adapter::{AdapterBackend, AdapterManifest};
pub use base::{Backend, BackendError, BackendResult, SamplingParams};
pub use hosted::HostedApiBackend;
pub use local::LocalServerBackend;

use crate::config::BackendConfig;
use crate::error::{Result, SolaceError};

/// Create a backend instance based on configuration
///
/// # Arguments
///
/// * `config` - Backend configuration, including which kind to build
///
/// # Returns
///
/// Returns a boxed backend instance
///
/// # Errors
///
/// Returns error if the backend kind is invalid or initialization fails
pub fn create_backend(config: &BackendConfig) -> Result<Box<dyn Backend>> {
    match config.kind.as_str() {
        "local" => Ok(Box::new(LocalServerBackend::new(config.local.clone())?)),
        "hosted" => Ok(Box::new(HostedApiBackend::new(config.hosted.clone())?)),
        "adapter" => {
            // The fallback is best-effort: a missing hosted key downgrades
            // the adapter to local-only rather than failing startup.
            let fallback = if config.adapter.hosted_fallback {
                match HostedApiBackend::new(config.hosted.clone()) {
                    Ok(hosted) => Some(hosted),
                    Err(e) => {
                        tracing::warn!("Hosted fallback unavailable: {}", e);
                        None
                    }
                }
            } else {
                None
            };

            Ok(Box::new(AdapterBackend::new(
                config.adapter.clone(),
                &config.local,
                fallback,
            )?))
        }
        other => Err(SolaceError::Config(format!(
            "Unknown backend type: {} (expected local, hosted, or adapter)",
            other
        ))
        .into()),
    }
}

/// Create a backend instance with optional overrides
///
/// Used by the CLI so `solace chat --backend hosted --model X` can retarget
/// a run without editing the config file.
///
/// # Arguments
///
/// * `config` - Backend configuration with settings for every kind
/// * `kind_override` - Optional backend kind ("local", "hosted", "adapter")
/// * `model_override` - Optional model identifier for the selected kind
///
/// # Errors
///
/// Returns error if the resolved kind is invalid or initialization fails
pub fn create_backend_with_override(
    config: &BackendConfig,
    kind_override: Option<&str>,
    model_override: Option<&str>,
) -> Result<Box<dyn Backend>> {
    let mut config = config.clone();

    if let Some(kind) = kind_override {
        config.kind = kind.to_string();
    }

    if let Some(model) = model_override {
        match config.kind.as_str() {
            "local" => config.local.model = model.to_string(),
            "hosted" => config.hosted.model = model.to_string(),
            "adapter" => config.adapter.model = model.to_string(),
            _ => {}
        }
    }

    create_backend(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_backend_local() {
        let config = BackendConfig::default();
        let backend = create_backend(&config).unwrap();
        assert_eq!(backend.name(), "local");
    }

    #[test]
    fn test_create_backend_invalid_kind() {
        let config = BackendConfig {
            kind: "mainframe".to_string(),
            ..BackendConfig::default()
        };
        let err = create_backend(&config).unwrap_err();
        assert!(err.to_string().contains("Unknown backend type"));
    }

    #[test]
    fn test_create_backend_with_override_kind() {
        let config = BackendConfig::default();
        // Force an invalid kind through the override path
        let result = create_backend_with_override(&config, Some("invalid"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_backend_with_override_model() {
        let config = BackendConfig::default();
        let backend = create_backend_with_override(&config, Some("local"), Some("llama3.2:1b"));
        assert!(backend.is_ok());
    }

    #[test]
    fn test_create_backend_with_no_overrides_uses_config() {
        let config = BackendConfig::default();
        let backend = create_backend_with_override(&config, None, None).unwrap();
        assert_eq!(backend.name(), "local");
    }
}
