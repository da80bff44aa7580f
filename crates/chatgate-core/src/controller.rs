//! Chat controller: the single owned object behind every front-end.
//!
//! Holds the current session record, the chat session id and the transcript,
//! and decides which view is shown. Front-ends call its methods in response
//! to user events and render whatever it reports back; it never prints.

use std::fmt;
use std::sync::Arc;

use chatgate_types::auth::SignupOutcome;
use chatgate_types::chat::{ChatMessage, ChatSessionId};
use chatgate_types::error::{ControllerError, DispatchError};
use chatgate_types::session::SessionRecord;
use serde::Serialize;
use tracing::{info, warn};

use crate::auth::provider::IdentityProvider;
use crate::auth::service::AuthService;
use crate::chat::dispatcher::ChatDispatcher;
use crate::chat::transcript::Transcript;
use crate::session::service::SessionPersistence;
use crate::session::store::SessionStore;

/// Which screen the front-end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Auth,
    Chat,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Auth => write!(f, "auth"),
            View::Chat => write!(f, "chat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible side message that is not part of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// How a dispatched message ended. Either way the transcript gained one user
/// and one assistant entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Replied(String),
    Failed(DispatchError),
}

/// Application state owned by one controller.
#[derive(Debug, Default)]
struct ControllerState {
    session: Option<SessionRecord>,
    chat_session_id: Option<ChatSessionId>,
    transcript: Transcript,
}

/// Drives the auth view / chat view lifecycle.
pub struct ChatController<P, S, D>
where
    P: IdentityProvider,
    S: SessionStore,
    D: ChatDispatcher,
{
    auth: AuthService<P>,
    sessions: SessionPersistence<S, P>,
    dispatcher: D,
    state: ControllerState,
}

impl<P, S, D> ChatController<P, S, D>
where
    P: IdentityProvider,
    S: SessionStore,
    D: ChatDispatcher,
{
    pub fn new(provider: Arc<P>, store: S, dispatcher: D) -> Self {
        Self {
            auth: AuthService::new(provider.clone()),
            sessions: SessionPersistence::new(store, provider),
            dispatcher,
            state: ControllerState::default(),
        }
    }

    /// Load the persisted session, renewing it if expired, and pick the view.
    pub async fn restore(&mut self) -> View {
        match self.sessions.load().await {
            Some(record) if record.is_authenticated() => {
                info!(email = ?record.email, "restored saved session");
                self.enter_chat(record);
            }
            Some(_) => {
                warn!("saved session has no user, ignoring it");
                self.reset();
            }
            None => self.reset(),
        }
        self.view()
    }

    pub fn view(&self) -> View {
        match &self.state.session {
            Some(record) if record.is_authenticated() => View::Chat,
            _ => View::Auth,
        }
    }

    pub fn session(&self) -> Option<&SessionRecord> {
        self.state.session.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.state.session.as_ref().and_then(|s| s.email.as_deref())
    }

    pub fn chat_session_id(&self) -> Option<ChatSessionId> {
        self.state.chat_session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    pub fn persistence(&self) -> &SessionPersistence<S, P> {
        &self.sessions
    }

    /// Log in and switch to the chat view.
    ///
    /// The view switches before the save is attempted, so the in-memory
    /// session never lags a persisted one. A failed save does not fail the
    /// login; it comes back as a warning. On error nothing changes and
    /// nothing is persisted.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Vec<Notice>, ControllerError> {
        let record = self.auth.login(email, password).await?;
        self.enter_chat(record.clone());

        let mut notices = Vec::new();
        match self.sessions.save(record).await {
            Ok(saved) => self.state.session = Some(saved),
            Err(e) => {
                warn!(error = %e, "failed to save session");
                notices.push(Notice::warning(format!(
                    "Logged in, but the session could not be saved: {e}"
                )));
            }
        }

        notices.push(Notice::info("Logged in."));
        Ok(notices)
    }

    /// Register an account. The view never changes.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SignupOutcome, ControllerError> {
        Ok(self.auth.signup(email, password, confirm_password).await?)
    }

    /// Send `text` to the chat backend.
    ///
    /// Appends exactly one user entry and then exactly one assistant entry
    /// (tagged as an error if the dispatch failed). Blank input or the auth
    /// view reject the message before anything is appended.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome, ControllerError> {
        if self.view() != View::Chat {
            return Err(ControllerError::NotLoggedIn);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ControllerError::EmptyMessage);
        }

        let chat_session_id = *self
            .state
            .chat_session_id
            .get_or_insert_with(ChatSessionId::new);

        let access_token = self
            .state
            .session
            .as_ref()
            .and_then(|s| s.access_token.as_deref())
            .filter(|t| !t.is_empty());

        let result = match access_token {
            Some(token) => self.dispatcher.send(&chat_session_id, text, token).await,
            None => Err(DispatchError::MissingToken),
        };

        // Both entries land together after the await, so a caller dropped
        // mid-dispatch leaves the transcript untouched.
        self.state.transcript.push(ChatMessage::user(text));
        let outcome = match result {
            Ok(reply) => {
                self.state.transcript.push(ChatMessage::assistant(reply.clone()));
                SendOutcome::Replied(reply)
            }
            Err(e) => {
                warn!(error = %e, "chat dispatch failed");
                self.state
                    .transcript
                    .push(ChatMessage::assistant_error(e.to_string()));
                SendOutcome::Failed(e)
            }
        };
        Ok(outcome)
    }

    /// Forget the session in memory and on disk, back to the auth view.
    pub async fn logout(&mut self) -> Vec<Notice> {
        self.reset();
        let mut notices = Vec::new();
        if let Err(e) = self.sessions.clear().await {
            warn!(error = %e, "failed to remove session file");
            notices.push(Notice::warning(format!(
                "The saved session could not be removed: {e}"
            )));
        }
        info!("logged out");
        notices.push(Notice::info("You have been logged out."));
        notices
    }

    fn enter_chat(&mut self, record: SessionRecord) {
        self.state.session = Some(record);
        self.state.chat_session_id = Some(ChatSessionId::new());
        self.state.transcript.clear();
    }

    fn reset(&mut self) {
        self.state = ControllerState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        EMAIL, MemoryStore, MockDispatcher, MockIdentity, PASSWORD, session_expiring_in,
    };
    use chatgate_types::chat::{MessageKind, MessageRole};
    use std::time::Duration;

    type TestController = ChatController<MockIdentity, MemoryStore, MockDispatcher>;

    fn controller(store: MemoryStore, dispatcher: MockDispatcher) -> TestController {
        ChatController::new(Arc::new(MockIdentity::new()), store, dispatcher)
    }

    async fn logged_in(dispatcher: MockDispatcher) -> TestController {
        let mut c = controller(MemoryStore::new(), dispatcher);
        c.login(EMAIL, PASSWORD).await.unwrap();
        c
    }

    #[tokio::test]
    async fn test_starts_in_auth_view() {
        let c = controller(MemoryStore::new(), MockDispatcher::replying("hi"));
        assert_eq!(c.view(), View::Auth);
        assert!(c.chat_session_id().is_none());
    }

    #[tokio::test]
    async fn test_login_switches_to_chat_view() {
        let mut c = controller(MemoryStore::new(), MockDispatcher::replying("hi"));
        let notices = c.login(EMAIL, PASSWORD).await.unwrap();

        assert_eq!(c.view(), View::Chat);
        let id = c.chat_session_id().unwrap();
        assert!(!id.to_string().is_empty());
        assert_eq!(c.email(), Some(EMAIL));
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Info));
        assert!(c.persistence().store().stored().is_some());
    }

    #[tokio::test]
    async fn test_login_wrong_password_stays_in_auth_view() {
        let mut c = controller(MemoryStore::new(), MockDispatcher::replying("hi"));
        let err = c.login(EMAIL, "nope").await.unwrap_err();

        assert!(matches!(err, ControllerError::Auth(_)));
        assert_eq!(c.view(), View::Auth);
        assert!(c.chat_session_id().is_none());
        assert!(c.persistence().store().stored().is_none());
    }

    #[tokio::test]
    async fn test_login_save_failure_is_a_warning() {
        let mut c = controller(MemoryStore::failing_writes(), MockDispatcher::replying("hi"));
        let notices = c.login(EMAIL, PASSWORD).await.unwrap();

        assert_eq!(c.view(), View::Chat);
        assert!(notices.iter().any(|n| n.level == NoticeLevel::Warning));
    }

    #[tokio::test]
    async fn test_restore_from_saved_session() {
        let store = MemoryStore::with_record(session_expiring_in(30));
        let mut c = controller(store, MockDispatcher::replying("hi"));
        assert_eq!(c.restore().await, View::Chat);
        assert!(c.chat_session_id().is_some());
    }

    #[tokio::test]
    async fn test_restore_without_saved_session() {
        let mut c = controller(MemoryStore::new(), MockDispatcher::replying("hi"));
        assert_eq!(c.restore().await, View::Auth);
    }

    #[tokio::test]
    async fn test_restore_ignores_record_without_user() {
        let record = SessionRecord {
            user_id: None,
            ..session_expiring_in(30)
        };
        let mut c = controller(MemoryStore::with_record(record), MockDispatcher::replying("hi"));
        assert_eq!(c.restore().await, View::Auth);
    }

    #[tokio::test]
    async fn test_send_appends_user_then_assistant() {
        let mut c = logged_in(MockDispatcher::replying("Hello there")).await;
        let outcome = c.send_message("hi").await.unwrap();

        assert_eq!(outcome, SendOutcome::Replied("Hello there".to_string()));
        let messages = c.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::user("hi"));
        assert_eq!(messages[1], ChatMessage::assistant("Hello there"));
    }

    #[tokio::test]
    async fn test_send_failure_still_appends_tagged_assistant_entry() {
        let err = DispatchError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let mut c = logged_in(MockDispatcher::failing(err.clone())).await;
        let outcome = c.send_message("hi").await.unwrap();

        assert_eq!(outcome, SendOutcome::Failed(err));
        let messages = c.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].kind, MessageKind::Error);
    }

    #[tokio::test]
    async fn test_send_uses_stable_session_id_and_token() {
        let mut c = logged_in(MockDispatcher::replying("ok")).await;
        let id = c.chat_session_id().unwrap();
        c.send_message("one").await.unwrap();
        c.send_message("two").await.unwrap();

        let calls = c.dispatcher.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(sid, _, token)| *sid == id && token == "access-1"));
        assert_eq!(calls[1].1, "two");
        assert_eq!(c.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_send_without_access_token() {
        let record = SessionRecord {
            access_token: None,
            ..session_expiring_in(30)
        };
        let mut c = controller(MemoryStore::with_record(record), MockDispatcher::replying("ok"));
        c.restore().await;
        let outcome = c.send_message("hi").await.unwrap();

        assert_eq!(outcome, SendOutcome::Failed(DispatchError::MissingToken));
        assert_eq!(c.transcript().len(), 2);
        assert_eq!(c.dispatcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_dropped_mid_dispatch_leaves_transcript_untouched() {
        let mut c = logged_in(MockDispatcher::slow("late", Duration::from_millis(200))).await;

        let dropped = tokio::time::timeout(Duration::from_millis(20), c.send_message("hi")).await;
        assert!(dropped.is_err());
        assert!(c.transcript().is_empty());

        c.send_message("again").await.unwrap();
        let messages = c.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::user("again"));
        assert_eq!(messages[1], ChatMessage::assistant("late"));
    }

    #[tokio::test]
    async fn test_send_rejected_in_auth_view() {
        let mut c = controller(MemoryStore::new(), MockDispatcher::replying("ok"));
        let err = c.send_message("hi").await.unwrap_err();
        assert_eq!(err, ControllerError::NotLoggedIn);
        assert!(c.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_send_rejects_blank_message() {
        let mut c = logged_in(MockDispatcher::replying("ok")).await;
        let err = c.send_message("   ").await.unwrap_err();
        assert_eq!(err, ControllerError::EmptyMessage);
        assert!(c.transcript().is_empty());
        assert_eq!(c.dispatcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let mut c = logged_in(MockDispatcher::replying("ok")).await;
        c.send_message("hi").await.unwrap();
        c.logout().await;

        assert_eq!(c.view(), View::Auth);
        assert!(c.chat_session_id().is_none());
        assert!(c.transcript().is_empty());
        assert!(c.persistence().store().stored().is_none());
    }

    #[tokio::test]
    async fn test_relogin_starts_new_conversation() {
        let mut c = logged_in(MockDispatcher::replying("ok")).await;
        let first = c.chat_session_id().unwrap();
        c.send_message("hi").await.unwrap();
        c.logout().await;
        c.login(EMAIL, PASSWORD).await.unwrap();

        assert_ne!(c.chat_session_id().unwrap(), first);
        assert!(c.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_signup_keeps_auth_view() {
        let c = controller(MemoryStore::new(), MockDispatcher::replying("ok"));
        let outcome = c
            .signup("new@example.com", "secret1", "secret1")
            .await
            .unwrap();
        assert!(outcome.confirmation_required);
        assert_eq!(c.view(), View::Auth);
    }
}
