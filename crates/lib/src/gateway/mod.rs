//! Webhook gateway: the HTTP server that receives LINE events and relays
//! them to the completion API.

mod server;

pub use server::{run_gateway, FALLBACK_REPLY, SYSTEM_PROMPT};
