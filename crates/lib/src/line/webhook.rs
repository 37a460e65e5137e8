//! Webhook payload types (LINE Messaging API event schema).

use serde::Deserialize;

/// Body of a webhook POST: a batch of events for the bot.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One webhook event. Fields are optional because the platform delivers
/// many event kinds (follow, unfollow, sticker, ...) through the same shape.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "replyToken", default)]
    pub reply_token: Option<String>,

    #[serde(default)]
    pub message: Option<MessageContent>,
}

/// Message body of a message event.
#[derive(Debug, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Present only for text messages.
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookPayload {
    /// Reply token and text of the first event, when that event carries a
    /// text message. Only the first event in the batch is handled; the rest
    /// are ignored.
    pub fn first_text_message(&self) -> Option<(&str, &str)> {
        let event = self.events.first()?;
        let token = event.reply_token.as_deref()?;
        let text = event.message.as_ref()?.text.as_deref()?;
        Some((token, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_message_event() {
        let body = r#"{
            "destination": "U4af4980629",
            "events": [{
                "type": "message",
                "replyToken": "reply-token-1",
                "source": { "type": "user", "userId": "U1234" },
                "message": { "id": "325708", "type": "text", "text": "Hello" }
            }]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(body).expect("parse payload");
        assert_eq!(
            payload.first_text_message(),
            Some(("reply-token-1", "Hello"))
        );
    }

    #[test]
    fn empty_events_yields_none() {
        let payload: WebhookPayload = serde_json::from_str(r#"{"events": []}"#).expect("parse");
        assert_eq!(payload.first_text_message(), None);
    }

    #[test]
    fn non_text_message_yields_none() {
        let body = r#"{
            "events": [{
                "type": "message",
                "replyToken": "reply-token-2",
                "message": { "id": "325709", "type": "sticker", "packageId": "1", "stickerId": "2" }
            }]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(body).expect("parse");
        assert_eq!(payload.first_text_message(), None);
    }

    #[test]
    fn only_first_event_is_used() {
        let body = r#"{
            "events": [
                { "type": "message", "replyToken": "first", "message": { "type": "text", "text": "one" } },
                { "type": "message", "replyToken": "second", "message": { "type": "text", "text": "two" } }
            ]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(body).expect("parse");
        assert_eq!(payload.first_text_message(), Some(("first", "one")));
    }
}
