//! Core types and error definitions for the AgentMesh pipeline.
//!
//! This crate provides the foundational types shared across all AgentMesh
//! crates: the inter-agent [`Message`] record, the pipeline [`Stage`]
//! identifiers, and the unified error type.
//!
//! # Main types
//!
//! - [`MeshError`] — Unified error enum for all AgentMesh subsystems.
//! - [`MeshResult`] — Convenience alias for `Result<T, MeshError>`.
//! - [`Message`] — A single directed message between two named participants.
//! - [`Stage`] — The pipeline stage an operation belongs to.

/// Inter-agent message record.
pub mod message;

use serde::{Deserialize, Serialize};

pub use message::Message;

// --- Error types ---

/// Top-level error type for the AgentMesh pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// A text-generation call failed. Fatal to the run; carries the stage
    /// it happened in and the subtask being worked on, if any.
    #[error("generation failed during {stage}{}: {message}", fmt_subtask(.subtask))]
    Generation {
        /// Pipeline stage where the failure occurred.
        stage: Stage,
        /// Identifier of the subtask being processed, when applicable.
        subtask: Option<String>,
        /// Human-readable description of the underlying fault.
        message: String,
    },

    /// An error from an outbound HTTP request (e.g. LLM API call).
    #[error("HTTP error: {0}")]
    Http(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_subtask(subtask: &Option<String>) -> String {
    match subtask {
        Some(id) => format!(" (subtask {id})"),
        None => String::new(),
    }
}

impl MeshError {
    /// Annotates any error with the stage (and optional subtask) it aborted,
    /// producing the [`MeshError::Generation`] variant the orchestrator
    /// records in failed bundles.
    pub fn generation(stage: Stage, subtask: Option<&str>, source: &MeshError) -> Self {
        MeshError::Generation {
            stage,
            subtask: subtask.map(str::to_string),
            message: source.to_string(),
        }
    }
}

/// A convenience `Result` alias using [`MeshError`].
pub type MeshResult<T> = Result<T, MeshError>;

// --- Pipeline stages ---

/// The ordered stages of a pipeline run.
///
/// A run moves strictly forward: planning, then coding and debugging per
/// subtask, then the final review. There is no branching back; any stage can
/// transition to a failed terminal state instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Task decomposition by the planner.
    Planning,
    /// Artifact production by the coder, per subtask.
    Coding,
    /// Artifact critique by the debugger, per subtask.
    Debugging,
    /// Final aggregate assessment by the reviewer.
    Review,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Planning => write!(f, "planning"),
            Stage::Coding => write!(f, "coding"),
            Stage::Debugging => write!(f, "debugging"),
            Stage::Review => write!(f, "review"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Planning.to_string(), "planning");
        assert_eq!(Stage::Debugging.to_string(), "debugging");
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&Stage::Review).unwrap();
        assert_eq!(json, "\"review\"");
        let parsed: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Stage::Review);
    }

    #[test]
    fn test_generation_error_display_with_subtask() {
        let inner = MeshError::Http("connection refused".to_string());
        let err = MeshError::generation(Stage::Coding, Some("task_2"), &inner);
        let text = err.to_string();
        assert!(text.contains("coding"));
        assert!(text.contains("task_2"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_generation_error_display_without_subtask() {
        let inner = MeshError::Http("rate limited".to_string());
        let err = MeshError::generation(Stage::Planning, None, &inner);
        let text = err.to_string();
        assert!(text.contains("planning"));
        assert!(!text.contains("subtask"));
    }
}
