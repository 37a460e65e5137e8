//! LINE Messaging API integration.
//!
//! Webhook payload types, `x-line-signature` verification, and the reply
//! client the gateway uses to answer inbound events.

mod client;
pub mod signature;
mod webhook;

pub use client::{LineClient, LineError};
pub use webhook::{MessageContent, WebhookEvent, WebhookPayload};
