//! Integration tests for the OpenAI-compatible backend against a mock server.

use agentmesh_agent::backends::openai::OpenAiGenerator;
use agentmesh_agent::{LlmProvider, ModelConfig, TextGenerator};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ModelConfig {
    ModelConfig {
        provider: LlmProvider::OpenAi,
        model_id: "gpt-4".to_string(),
        api_key: "sk-test".to_string(),
        api_base_url: Some(server.uri()),
        temperature: 0.1,
        max_tokens: 4096,
    }
}

#[tokio::test]
async fn generate_returns_completion_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4",
            "temperature": 0.1,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": "def main():\n    pass" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = OpenAiGenerator::new(config_for(&server));
    let text = backend
        .generate("You are a coder.", "Write a stub.")
        .await
        .expect("generation should succeed");

    assert_eq!(text, "def main():\n    pass");
}

#[tokio::test]
async fn generate_sends_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                { "role": "system", "content": "persona" },
                { "role": "user", "content": "request" },
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = OpenAiGenerator::new(config_for(&server));
    let text = backend.generate("persona", "request").await.expect("ok");
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn generate_surfaces_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "message": "rate limit exceeded" }
        })))
        .mount(&server)
        .await;

    let backend = OpenAiGenerator::new(config_for(&server));
    let err = backend
        .generate("persona", "request")
        .await
        .expect_err("429 should surface as an error");

    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn generate_rejects_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&server)
        .await;

    let backend = OpenAiGenerator::new(config_for(&server));
    assert!(backend.generate("persona", "request").await.is_err());
}
