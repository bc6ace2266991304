use crate::backends::openai::OpenAiGenerator;
use crate::config::ModelConfig;
use agentmesh_core::MeshResult;
use async_trait::async_trait;
use std::sync::Arc;

/// The opaque text-generation capability the pipeline depends on.
///
/// `instructions` is the agent's fixed persona/rules; `request` is the
/// task-specific framing of the incoming message. The call blocks until the
/// provider returns text or fails; no retry or timeout policy lives at this
/// layer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce raw text for the given instructions and request.
    async fn generate(&self, instructions: &str, request: &str) -> MeshResult<String>;
}

/// Builds the generator backend matching the provider in `config`.
///
/// All current providers are OpenAI-compatible and share one backend. To add
/// a new provider: implement [`TextGenerator`] in `backends/` and wire it
/// here.
pub fn generator_for(config: ModelConfig) -> Arc<dyn TextGenerator> {
    Arc::new(OpenAiGenerator::new(config))
}
