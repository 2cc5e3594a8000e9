//! Wire types and reply resolution for the inference endpoint.
//!
//! The endpoint is an opaque request/response service: one POST per user
//! message, JSON body `{"message": <text>}`, no conversation history. The
//! response body is inspected leniently via [`resolve_reply`] because the
//! bridge forwards whatever its upstream model hands back.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::core::message::{format_endpoint_error, INVALID_RESPONSE_TEXT};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// The request itself failed: network unreachable, connection refused, or a
/// body that isn't JSON at all. Distinct from an error-shaped JSON payload,
/// which flows through [`resolve_reply`] instead.
#[derive(Debug)]
pub struct TransportError(pub reqwest::Error);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chat request failed: {}", self.0)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Map a JSON response body to the bot text to display, trying in order:
/// an array whose first element carries `generated_text`, then a top-level
/// `error` field, then a fixed invalid-response message.
pub fn resolve_reply(payload: &Value) -> String {
    if let Some(text) = payload
        .get(0)
        .and_then(|first| first.get("generated_text"))
        .and_then(Value::as_str)
    {
        return text.to_string();
    }

    if let Some(error) = payload.get("error").and_then(Value::as_str) {
        return format_endpoint_error(error);
    }

    INVALID_RESPONSE_TEXT.to_string()
}

#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue exactly one POST carrying `message`. Any JSON body (whatever the
    /// HTTP status) is returned for the resolution policy to inspect; failure
    /// to reach the endpoint or to parse the body as JSON is a transport
    /// error.
    pub async fn send_message(&self, message: &str) -> Result<Value, TransportError> {
        debug!(endpoint = %self.endpoint, "dispatching chat request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(TransportError)?;

        response.json::<Value>().await.map_err(TransportError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generated_text_wins_when_present() {
        let payload = json!([{ "generated_text": "hello" }]);
        assert_eq!(resolve_reply(&payload), "hello");
    }

    #[test]
    fn generated_text_takes_priority_over_error_shapes() {
        // A sequence response is consulted before any error field.
        let payload = json!([{ "generated_text": "ok", "error": "ignored" }]);
        assert_eq!(resolve_reply(&payload), "ok");
    }

    #[test]
    fn error_field_is_surfaced_with_prefix() {
        let payload = json!({ "error": "rate limited" });
        assert_eq!(resolve_reply(&payload), "⚠️ Error: rate limited");
    }

    #[test]
    fn unrecognized_shapes_fall_back_to_invalid_response() {
        for payload in [
            json!({}),
            json!([]),
            json!([{ "text": "wrong field" }]),
            json!({ "error": 42 }),
            json!("just a string"),
            json!(null),
        ] {
            assert_eq!(resolve_reply(&payload), INVALID_RESPONSE_TEXT);
        }
    }

    #[test]
    fn request_body_serializes_message_field() {
        let body = serde_json::to_value(ChatRequest { message: "hi" }).unwrap();
        assert_eq!(body, json!({ "message": "hi" }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 1 is never listening locally.
        let client = ChatClient::new("http://127.0.0.1:1/chat".to_string());
        let err = client.send_message("hello").await.unwrap_err();
        assert!(err.0.is_connect() || err.0.is_request());
    }
}
