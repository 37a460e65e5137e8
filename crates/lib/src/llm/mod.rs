//! LLM abstraction and OpenAI chat-completion client.

mod openai;

pub use openai::{ChatMessage, OpenAiClient, OpenAiError};
