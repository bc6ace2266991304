use crate::config::{LlmProvider, ModelConfig};
use crate::generator::TextGenerator;
use agentmesh_core::{MeshError, MeshResult};
use async_trait::async_trait;

/// OpenAI-compatible API backend.
///
/// Works with OpenAI, OpenRouter, Groq, and any other provider that
/// implements the OpenAI chat completions API.
pub struct OpenAiGenerator {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiGenerator {
    /// Creates a backend for the given endpoint configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter requires extra headers
        if matches!(self.config.provider, LlmProvider::OpenRouter) {
            request
                .header("HTTP-Referer", "https://github.com/agentmesh/agentmesh")
                .header("X-Title", "AgentMesh")
        } else {
            request
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, instructions: &str, request: &str) -> MeshResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let body = serde_json::json!({
            "model": self.config.model_id,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": instructions },
                { "role": "user", "content": request },
            ],
        });

        let req = self.add_provider_headers(self.http.post(&url));

        let resp = req
            .json(&body)
            .send()
            .await
            .map_err(|e| MeshError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| MeshError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(MeshError::Http(format!(
                "chat completions error {status}: {resp_body}"
            )));
        }

        parse_completion(&resp_body)
    }
}

/// Extracts the assistant text from a chat completions response body.
pub fn parse_completion(body: &serde_json::Value) -> MeshResult<String> {
    match body["choices"][0]["message"]["content"].as_str() {
        Some(content) => Ok(content.to_string()),
        None => Err(MeshError::Http(format!(
            "chat completions response missing content: {body}"
        ))),
    }
}
