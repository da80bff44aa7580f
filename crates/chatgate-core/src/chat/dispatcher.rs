//! ChatDispatcher trait definition.

use chatgate_types::chat::ChatSessionId;
use chatgate_types::error::DispatchError;

/// Sends one user message to the chat backend and returns its textual reply.
///
/// One request, one response: no retry, no streaming. Implementations live in
/// chatgate-infra (e.g., `WebhookDispatcher`).
pub trait ChatDispatcher: Send + Sync {
    fn send(
        &self,
        session_id: &ChatSessionId,
        message: &str,
        access_token: &str,
    ) -> impl std::future::Future<Output = Result<String, DispatchError>> + Send;
}
