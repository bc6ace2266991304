use serde::{Deserialize, Serialize};

/// Supported text-generation providers.
///
/// All current providers speak the OpenAI chat completions API, so they
/// share one backend and differ only in base URL and credentials.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI's own API.
    OpenAi,
    /// OpenRouter aggregation layer.
    OpenRouter,
    /// Groq cloud inference — OpenAI-compatible API, free tier with rate limits.
    Groq,
}

/// Configuration for one text-generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which provider to call.
    pub provider: LlmProvider,
    /// Provider-specific model identifier (e.g. `gpt-4`).
    pub model_id: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Override for the provider's default base URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Sampling temperature. Each agent role overrides this in its profile.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum completion tokens per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    4096
}

impl ModelConfig {
    /// The base URL requests are sent to, honoring `api_base_url` overrides.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
                LlmProvider::Groq => "https://api.groq.com/openai",
            }
        }
    }
}
