//! Gemini client tests against a wiremock server.

use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huginn::{
    Capability, GeminiClient, HuginnError, InferenceProvider, ModelRegistry, ProviderConfig,
    RequestInput,
};

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_config(
        "gm_test_key",
        ProviderConfig::gemini()
            .base_url(base_url)
            .min_interval(Duration::ZERO),
    )
}

fn input(prompt: &str) -> RequestInput<'_> {
    RequestInput {
        prompt,
        context: None,
        history: &[],
        labels: &[],
    }
}

#[tokio::test]
async fn successful_generate_call_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "gm_test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "El pan está en la despensa." }] },
                "finishReason": "STOP",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let registry = ModelRegistry::builtin();
    let spec = registry.specs_for("gemini", Capability::Translate)[0];

    let result = client
        .invoke(spec, &input("The bread is in the pantry."))
        .await
        .unwrap();
    assert_eq!(result.text, "El pan está en la despensa.");
    assert_eq!(result.model.as_deref(), Some("gemini-1.5-flash"));
    assert!(result.confidence.is_none());
}

#[tokio::test]
async fn embedding_call_uses_the_embed_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/text-embedding-004:embedContent"))
        .and(body_partial_json(serde_json::json!({
            "model": "models/text-embedding-004"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "embedding": { "values": [0.1, -0.2, 0.3, 0.05] },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let registry = ModelRegistry::builtin();
    let spec = registry.specs_for("gemini", Capability::Embedding)[0];

    let result = client.invoke(spec, &input("shopping list")).await.unwrap();
    assert_eq!(result.text, "4-dimensional embedding");
}

/// Gemini reports a bad key as HTTP 400 with an explanatory message; the
/// client must still latch off.
#[tokio::test]
async fn invalid_key_400_disables_the_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let registry = ModelRegistry::builtin();
    let spec = registry.specs_for("gemini", Capability::Answer)[0];

    let err = client.invoke(spec, &input("hello")).await.unwrap_err();
    assert!(matches!(err, HuginnError::AuthenticationFailed));
    assert!(client.is_disabled());

    // No further HTTP; expect(1) verifies on drop.
    let err = client.invoke(spec, &input("hello")).await.unwrap_err();
    assert!(matches!(err, HuginnError::AuthenticationFailed));
}

/// An ordinary 400 (malformed request) is an API error, not an auth latch.
#[tokio::test]
async fn plain_bad_request_does_not_disable_the_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "Invalid JSON payload received.",
                "status": "INVALID_ARGUMENT",
            },
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let registry = ModelRegistry::builtin();
    let spec = registry.specs_for("gemini", Capability::Summarize)[0];

    let err = client.invoke(spec, &input("some text")).await.unwrap_err();
    assert!(matches!(err, HuginnError::Api { status: 400, .. }));
    assert!(!client.is_disabled());
}

/// No wait-for-model semantics: a 503 fails fast with a single call.
#[tokio::test]
async fn overloaded_503_fails_fast() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let registry = ModelRegistry::builtin();
    let spec = registry.specs_for("gemini", Capability::Sentiment)[0];

    let err = client.invoke(spec, &input("I love this")).await.unwrap_err();
    assert!(matches!(err, HuginnError::Api { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn safety_blocked_response_is_bad_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" },
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let registry = ModelRegistry::builtin();
    let spec = registry.specs_for("gemini", Capability::Answer)[0];

    let err = client.invoke(spec, &input("question")).await.unwrap_err();
    assert!(matches!(err, HuginnError::BadResponse(_)));
}
