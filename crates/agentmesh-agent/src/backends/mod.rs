//! Provider backends implementing [`crate::TextGenerator`].

pub mod openai;
