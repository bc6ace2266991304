use crate::generator::TextGenerator;
use crate::profiles::AgentProfile;
use crate::roles::AgentRole;
use agentmesh_core::{MeshResult, Message};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// A pipeline participant: converts an incoming [`Message`] into an outgoing
/// one via the text-generation capability.
///
/// One struct serves all four roles; the differences live in the role data
/// on [`AgentProfile`]. Each agent keeps a private history of the messages
/// it has seen and sent. The history is lock-protected so a shared agent is
/// safe to touch, but the pipeline gives each run exclusive agents.
pub struct Agent {
    profile: AgentProfile,
    generator: Arc<dyn TextGenerator>,
    history: Mutex<Vec<Message>>,
}

impl Agent {
    /// Creates an agent from its profile and a generator backend.
    pub fn new(profile: AgentProfile, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            profile,
            generator,
            history: Mutex::new(Vec::new()),
        }
    }

    /// This agent's role.
    pub fn role(&self) -> AgentRole {
        self.profile.role
    }

    /// This agent's participant name, used as message sender.
    pub fn name(&self) -> &'static str {
        self.profile.role.name()
    }

    /// Processes an incoming message and returns the reply.
    ///
    /// The reply is a new message addressed back to the incoming sender,
    /// carrying this role's `task_type` metadata. A generation failure
    /// propagates as an error without producing an outgoing message; there
    /// are no internal retries.
    pub async fn respond(&self, incoming: &Message) -> MeshResult<Message> {
        self.record(incoming);

        let request = self.profile.role.frame_request(&incoming.content);
        let raw = self
            .generator
            .generate(&self.profile.instructions, &request)
            .await?;
        let content = self.profile.role.postprocess(raw);

        let reply = Message::new(self.name(), incoming.sender.as_str(), content)
            .with_metadata(self.profile.role.reply_metadata(incoming));
        self.record(&reply);

        info!(
            agent = self.name(),
            recipient = %reply.recipient,
            chars = reply.content.len(),
            "agent replied"
        );

        Ok(reply)
    }

    /// A snapshot of this agent's message history.
    pub fn history(&self) -> Vec<Message> {
        self.history.lock().clone()
    }

    fn record(&self, message: &Message) {
        self.history.lock().push(message.clone());
    }
}
