//! Reply client for the LINE Messaging API.

use serde::Serialize;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.line.me";

const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Messaging API reply endpoint.
#[derive(Clone)]
pub struct LineClient {
    api_base: String,
    channel_access_token: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("line api error: {0}")]
    Api(String),
}

#[derive(Serialize)]
struct ReplyRequest {
    #[serde(rename = "replyToken")]
    reply_token: String,
    messages: Vec<TextMessage>,
}

#[derive(Serialize)]
struct TextMessage {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl LineClient {
    pub fn new(channel_access_token: String, api_base: Option<String>) -> Self {
        let api_base = api_base
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base,
            channel_access_token,
            client: reqwest::Client::new(),
        }
    }

    /// POST /v2/bot/message/reply — send one text message for a reply token.
    /// Single-shot: not retried and not confirmed.
    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let body = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![TextMessage {
                kind: "text",
                text: text.to_string(),
            }],
        };
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.channel_access_token)
            .timeout(REPLY_TIMEOUT)
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(LineError::Api(format!("{} {}", status, body)));
        }
        Ok(())
    }
}
