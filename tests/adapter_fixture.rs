//! Adapter backend fixture tests
//!
//! Exercises manifest loading against real files and the hosted-fallback
//! path when the local runtime serving the adapter is unreachable.

use serde_json::json;
use std::fs;
use tempfile::TempDir;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solace::backends::{
    AdapterBackend, Backend, BackendError, HostedApiBackend, SamplingParams,
};
use solace::config::{AdapterConfig, HostedBackendConfig, LocalBackendConfig};

fn adapter_dir_with_manifest() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("adapter_config.json"),
        json!({
            "base_model_name_or_path": "mistralai/Mistral-7B-Instruct-v0.3",
            "peft_type": "LORA",
            "r": 16,
            "lora_alpha": 32
        })
        .to_string(),
    )
    .unwrap();
    dir
}

fn unreachable_local() -> LocalBackendConfig {
    LocalBackendConfig {
        host: "http://127.0.0.1:9".to_string(),
        model: "unused".to_string(),
        timeout_seconds: 1,
    }
}

#[test]
fn test_adapter_construction_requires_manifest() {
    let empty_dir = TempDir::new().unwrap();
    let config = AdapterConfig {
        path: empty_dir.path().to_path_buf(),
        model: "mistral-mental-health".to_string(),
        hosted_fallback: false,
    };

    let err = AdapterBackend::new(config, &unreachable_local(), None).unwrap_err();
    assert!(err.to_string().contains("adapter_config.json"));
}

#[test]
fn test_adapter_construction_reads_base_model() {
    let dir = adapter_dir_with_manifest();
    let config = AdapterConfig {
        path: dir.path().to_path_buf(),
        model: "mistral-mental-health".to_string(),
        hosted_fallback: false,
    };

    let backend = AdapterBackend::new(config, &unreachable_local(), None).unwrap();
    assert_eq!(backend.base_model(), "mistralai/Mistral-7B-Instruct-v0.3");
}

#[tokio::test]
async fn test_adapter_without_fallback_surfaces_runtime_error() {
    let dir = adapter_dir_with_manifest();
    let config = AdapterConfig {
        path: dir.path().to_path_buf(),
        model: "mistral-mental-health".to_string(),
        hosted_fallback: false,
    };

    let backend = AdapterBackend::new(config, &unreachable_local(), None).unwrap();
    let err = backend
        .generate("hello", &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Connectivity(_)));
}

#[tokio::test]
async fn test_adapter_falls_back_to_hosted_on_runtime_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "fallback reply"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hosted = HostedApiBackend::with_api_key(
        HostedBackendConfig {
            api_base: server.uri(),
            model: "mistralai/mistral-7b-instruct:free".to_string(),
            api_key_env: "UNUSED".to_string(),
            timeout_seconds: 5,
        },
        "test-key".to_string(),
    )
    .unwrap();

    let dir = adapter_dir_with_manifest();
    let config = AdapterConfig {
        path: dir.path().to_path_buf(),
        model: "mistral-mental-health".to_string(),
        hosted_fallback: true,
    };

    let backend = AdapterBackend::new(config, &unreachable_local(), Some(hosted)).unwrap();
    let reply = backend
        .generate("hello", &SamplingParams::default())
        .await
        .unwrap();

    assert_eq!(reply, "fallback reply");
}

#[tokio::test]
async fn test_adapter_probe_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hosted = HostedApiBackend::with_api_key(
        HostedBackendConfig {
            api_base: server.uri(),
            model: "mistralai/mistral-7b-instruct:free".to_string(),
            api_key_env: "UNUSED".to_string(),
            timeout_seconds: 5,
        },
        "test-key".to_string(),
    )
    .unwrap();

    let dir = adapter_dir_with_manifest();
    let config = AdapterConfig {
        path: dir.path().to_path_buf(),
        model: "mistral-mental-health".to_string(),
        hosted_fallback: true,
    };

    let backend = AdapterBackend::new(config, &unreachable_local(), Some(hosted)).unwrap();
    assert!(backend.probe().await.is_ok());
}
