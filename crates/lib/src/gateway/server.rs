//! Gateway HTTP server (single port).
//!
//! `POST /` is the LINE webhook. The handler acknowledges every request
//! with `200 OK` — the platform treats any other status as a delivery
//! failure and retries the webhook — so internal failures are logged and
//! suppressed rather than surfaced to the caller.

use crate::config::Config;
use crate::line::{signature, LineClient, WebhookPayload};
use crate::llm::{ChatMessage, OpenAiClient, OpenAiError};
use anyhow::{bail, Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// System instruction sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Reply text used when the completion call times out.
pub const FALLBACK_REPLY: &str = "Sorry, I cannot help you right now, please try again later";

const SIGNATURE_HEADER: &str = "x-line-signature";

/// Shared state: immutable config plus the two outbound clients.
#[derive(Clone)]
struct GatewayState {
    config: Arc<Config>,
    line: LineClient,
    openai: OpenAiClient,
}

/// Run the webhook server until SIGINT/SIGTERM.
pub async fn run_gateway(config: Config) -> Result<()> {
    let line = LineClient::new(
        config.line.channel_access_token.clone(),
        Some(config.line.api_base.clone()),
    );
    let openai = OpenAiClient::new(
        config.openai.api_key.clone(),
        Some(config.openai.base_url.clone()),
        config.openai.timeout,
    );
    let state = GatewayState {
        config: Arc::new(config),
        line,
        openai,
    };

    let bind_addr = format!("{}:{}", state.config.server.bind, state.config.server.port);
    let app = Router::new()
        .route("/", get(health_http).post(line_webhook))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("webhook server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server exited")?;
    log::info!("webhook server stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received");
}

/// POST / — receives a LINE webhook POST. Always answers `200 OK` with body
/// "OK"; any failure in the relay is logged and suppressed.
async fn line_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> &'static str {
    if let Err(e) = relay(&state, &headers, &body).await {
        log::error!("webhook dropped: {:#}", e);
    }
    "OK"
}

/// Verify, extract, complete, reply. Every error path ends up in the
/// handler's log line; only the completion timeout is recovered inline,
/// by substituting the fixed fallback reply.
async fn relay(state: &GatewayState, headers: &HeaderMap, body: &Bytes) -> Result<()> {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .context("missing x-line-signature header")?;
    if !signature::verify(&state.config.line.channel_secret, provided, body) {
        bail!("signature mismatch");
    }

    let payload: WebhookPayload =
        serde_json::from_slice(body).context("malformed webhook payload")?;
    let Some((reply_token, text)) = payload.first_text_message() else {
        bail!("no text message in payload");
    };
    log::debug!("inbound message: {}", text);

    let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(text)];
    let reply_text = match state.openai.chat(&state.config.openai.model, messages).await {
        Ok(content) => content,
        Err(OpenAiError::Timeout) => {
            log::warn!("completion timed out, sending fallback reply");
            FALLBACK_REPLY.to_string()
        }
        Err(e) => return Err(e).context("completion request failed"),
    };

    state
        .line
        .reply(reply_token, &reply_text)
        .await
        .context("reply request failed")?;
    log::info!("replied to message ({} chars)", reply_text.len());
    Ok(())
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.server.port,
    }))
}
