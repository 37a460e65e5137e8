//! OpenAI chat-completion client (https://api.openai.com/v1 by default).
//! Non-streaming only; timeouts are reported as a distinct error so the
//! caller can substitute a fallback reply.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("openai request timed out")]
    Timeout,
    #[error("openai request failed: {0}")]
    Request(reqwest::Error),
    #[error("openai api error: {0}")]
    Api(String),
    #[error("openai response contained no choices")]
    NoChoices,
}

/// One conversation message, request or response side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            api_key,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// POST /chat/completions — non-streaming chat. Returns the first
    /// choice's message content verbatim.
    pub async fn chat(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: model.to_string(),
            messages,
        };
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(classify)?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(OpenAiError::Api(format!("{} {}", status, body)));
        }
        let data: ChatResponse = res.json().await.map_err(classify)?;
        data.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(OpenAiError::NoChoices)
    }
}

fn classify(e: reqwest::Error) -> OpenAiError {
    if e.is_timeout() {
        OpenAiError::Timeout
    } else {
        OpenAiError::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_completion_response() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hi there!" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 }
        }"#;
        let data: ChatResponse = serde_json::from_str(body).expect("parse response");
        assert_eq!(data.choices[0].message.content, "Hi there!");
    }

    #[test]
    fn empty_choices_parse_to_empty_vec() {
        let data: ChatResponse = serde_json::from_str(r#"{"id": "x"}"#).expect("parse");
        assert!(data.choices.is_empty());
    }
}
