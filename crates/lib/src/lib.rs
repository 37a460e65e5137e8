//! Core library for the LINE relay bot — configuration, webhook gateway,
//! LINE messaging client, and OpenAI chat-completion client used by the
//! CLI binary.

pub mod config;
pub mod gateway;
pub mod line;
pub mod llm;
