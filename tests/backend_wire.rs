//! Wire-format tests for the HTTP backends
//!
//! Asserts the exact request shapes each backend puts on the wire and the
//! error taxonomy it maps responses into.

use serde_json::json;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solace::backends::{Backend, BackendError, HostedApiBackend, LocalServerBackend, SamplingParams};
use solace::config::{HostedBackendConfig, LocalBackendConfig};

fn local_backend(server: &MockServer) -> LocalServerBackend {
    LocalServerBackend::new(LocalBackendConfig {
        host: server.uri(),
        model: "mistral:instruct".to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}

fn hosted_backend(server: &MockServer) -> HostedApiBackend {
    HostedApiBackend::with_api_key(
        HostedBackendConfig {
            api_base: server.uri(),
            model: "mistralai/mistral-7b-instruct:free".to_string(),
            api_key_env: "UNUSED".to_string(),
            timeout_seconds: 5,
        },
        "test-key".to_string(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_local_backend_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "mistral:instruct",
            "prompt": "[INST]hello there[/INST]",
            "stream": false,
            "options": {
                "temperature": 0.7,
                "top_p": 0.9,
                "num_predict": 512,
                "stop": ["[INST]", "[/INST]"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hi"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = local_backend(&server);
    let reply = backend
        .generate("hello there", &SamplingParams::default())
        .await
        .unwrap();

    assert_eq!(reply, "hi");
}

#[tokio::test]
async fn test_local_backend_maps_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let backend = local_backend(&server);
    let err = backend
        .generate("hello", &SamplingParams::default())
        .await
        .unwrap_err();

    match err {
        BackendError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("model not found"));
        }
        other => panic!("expected Status error, got {:?}", other.to_string()),
    }
}

#[tokio::test]
async fn test_local_backend_maps_connection_refused() {
    let backend = LocalServerBackend::new(LocalBackendConfig {
        host: "http://127.0.0.1:9".to_string(),
        model: "mistral:instruct".to_string(),
        timeout_seconds: 1,
    })
    .unwrap();

    let err = backend
        .generate("hello", &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Connectivity(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_hosted_backend_request_shape_and_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "mistralai/mistral-7b-instruct:free",
            "messages": [{"role": "user", "content": "how are you?"}],
            "max_tokens": 512,
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Doing well."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = hosted_backend(&server);
    let reply = backend
        .generate("how are you?", &SamplingParams::default())
        .await
        .unwrap();

    assert_eq!(reply, "Doing well.");
}

#[tokio::test]
async fn test_hosted_backend_maps_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let backend = hosted_backend(&server);
    let err = backend
        .generate("hello", &SamplingParams::default())
        .await
        .unwrap_err();

    match err {
        BackendError::Status { status, .. } => assert_eq!(status, 429),
        other => panic!("expected Status error, got {:?}", other.to_string()),
    }
}

#[tokio::test]
async fn test_hosted_backend_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let backend = hosted_backend(&server);
    let err = backend
        .generate("hello", &SamplingParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Connectivity(_)));
    assert!(err.to_string().contains("no choices"));
}

#[tokio::test]
async fn test_backend_probe_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"options": {"num_predict": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": ""})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = local_backend(&server);
    assert!(backend.probe().await.is_ok());
}
