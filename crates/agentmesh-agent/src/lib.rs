//! Pipeline participants and the text-generation capability they call.
//!
//! The four agent roles (planner, coder, debugger, reviewer) share one
//! [`Agent`] implementation parameterized by an [`AgentProfile`]: a fixed
//! instruction template, a request framing, and reply metadata per role.
//! The generation capability itself is behind the [`TextGenerator`] trait;
//! [`generator_for`] builds the HTTP backend for a [`ModelConfig`].

/// Participant implementation shared by all roles.
pub mod agent;
/// Provider backends.
pub mod backends;
/// Model endpoint configuration.
pub mod config;
/// The text-generation trait and backend factory.
pub mod generator;
/// Default role profiles and instruction templates.
pub mod profiles;
/// Role data: names, tags, framings, metadata.
pub mod roles;

pub use agent::Agent;
pub use config::{LlmProvider, ModelConfig};
pub use generator::{generator_for, TextGenerator};
pub use profiles::{default_profiles, AgentProfile};
pub use roles::AgentRole;
