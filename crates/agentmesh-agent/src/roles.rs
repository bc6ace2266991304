use agentmesh_core::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of each agent in the pipeline.
///
/// The four roles share one [`crate::Agent`] implementation and differ only
/// in the data attached here: instruction template, request framing, reply
/// metadata, and post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Breaks a user task down into subtasks.
    Planner,
    /// Produces a code artifact for one subtask.
    Coder,
    /// Critiques one artifact and suggests fixes.
    Debugger,
    /// Produces the final aggregate assessment.
    Reviewer,
}

impl AgentRole {
    /// The participant name used as message sender.
    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Planner => "Planner",
            AgentRole::Coder => "Coder",
            AgentRole::Debugger => "Debugger",
            AgentRole::Reviewer => "Reviewer",
        }
    }

    /// The `task_type` metadata tag attached to this role's replies.
    pub fn task_type(&self) -> &'static str {
        match self {
            AgentRole::Planner => "plan",
            AgentRole::Coder => "code",
            AgentRole::Debugger => "debug",
            AgentRole::Reviewer => "review",
        }
    }

    /// Embeds the incoming message content into this role's request framing.
    pub fn frame_request(&self, content: &str) -> String {
        match self {
            AgentRole::Planner => format!(
                "Please break down the following software development task into subtasks:\n\n{content}"
            ),
            AgentRole::Coder => format!(
                "Please write Python code for the following subtask:\n\n{content}\n\n\
                 Provide complete, runnable Python code that implements this functionality."
            ),
            AgentRole::Debugger => format!(
                "Please review and debug the following Python code:\n\n{content}\n\n\
                 Provide a comprehensive analysis of any issues found and suggest improvements."
            ),
            AgentRole::Reviewer => format!(
                "Please conduct a final review of the completed software development work:\n\n{content}\n\n\
                 Provide a comprehensive final assessment including completion status, \
                 quality score, and approval status."
            ),
        }
    }

    /// The metadata this role attaches to its reply, given the message it is
    /// replying to.
    pub fn reply_metadata(&self, incoming: &Message) -> HashMap<String, serde_json::Value> {
        let mut metadata = HashMap::new();
        metadata.insert(
            "task_type".to_string(),
            serde_json::json!(self.task_type()),
        );
        match self {
            AgentRole::Planner => {
                metadata.insert(
                    "original_task".to_string(),
                    serde_json::json!(incoming.content),
                );
            }
            AgentRole::Coder => {
                metadata.insert("subtask".to_string(), serde_json::json!(incoming.content));
            }
            AgentRole::Debugger => {
                metadata.insert("code_review".to_string(), serde_json::json!(true));
            }
            AgentRole::Reviewer => {
                metadata.insert("final_assessment".to_string(), serde_json::json!(true));
            }
        }
        metadata
    }

    /// Post-processes the raw generated text before it becomes a reply.
    ///
    /// The planner canonicalizes parseable JSON by re-serializing it
    /// pretty-printed; unparseable text passes through verbatim so the plan
    /// parser's fallback can take over downstream. Other roles pass text
    /// through unchanged.
    pub fn postprocess(&self, raw: String) -> String {
        match self {
            AgentRole::Planner => match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(raw),
                Err(_) => raw,
            },
            _ => raw,
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.task_type())
    }
}
