//! WebhookDispatcher -- [`ChatDispatcher`] over a single HTTP webhook.
//!
//! Request: `POST {url}` with `Authorization: Bearer <access token>` and
//! `{"sessionId": "...", "chatInput": "..."}`. The reply text is the
//! `output` field of the JSON answer, which must be a string.

use tracing::{debug, warn};

use chatgate_core::chat::dispatcher::ChatDispatcher;
use serde_json::Value;

use chatgate_types::chat::{ChatSessionId, WebhookRequest};
use chatgate_types::error::DispatchError;

use crate::http::truncate_body;

const MAX_ERROR_CHARS: usize = 300;

pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: String,
}

impl WebhookDispatcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatDispatcher for WebhookDispatcher {
    async fn send(
        &self,
        session_id: &ChatSessionId,
        message: &str,
        access_token: &str,
    ) -> Result<String, DispatchError> {
        if access_token.trim().is_empty() {
            return Err(DispatchError::MissingToken);
        }

        let body = WebhookRequest {
            session_id: session_id.to_string(),
            chat_input: message.to_string(),
        };
        debug!(session_id = %session_id, chars = message.len(), "dispatching chat message");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "chat backend returned an error");
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body: truncate_body(&text, MAX_ERROR_CHARS),
            });
        }

        let reply: Value =
            serde_json::from_str(&text).map_err(|e| DispatchError::Decode(e.to_string()))?;
        reply
            .get("output")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(DispatchError::MissingOutput)
    }
}
