//! In-memory port implementations shared by the unit tests in this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, Utc};

use chatgate_types::auth::{Credentials, SignupOutcome};
use chatgate_types::chat::ChatSessionId;
use chatgate_types::error::{AuthError, DispatchError, PersistenceError};
use chatgate_types::session::SessionRecord;

use crate::auth::provider::IdentityProvider;
use crate::chat::dispatcher::ChatDispatcher;
use crate::session::store::SessionStore;

pub const EMAIL: &str = "an@example.com";
pub const PASSWORD: &str = "correct horse";

pub fn session_expiring_in(minutes: i64) -> SessionRecord {
    SessionRecord {
        user_id: Some("user-1".to_string()),
        email: Some(EMAIL.to_string()),
        access_token: Some("access-1".to_string()),
        refresh_token: Some("refresh-1".to_string()),
        expires_at: Some(Utc::now() + Duration::minutes(minutes)),
        saved_at: None,
    }
}

/// Identity provider that accepts exactly one email/password pair.
pub struct MockIdentity {
    refresh_result: Result<SessionRecord, AuthError>,
    pub sign_in_calls: AtomicUsize,
    pub sign_up_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
}

impl MockIdentity {
    pub fn new() -> Self {
        let renewed = SessionRecord {
            access_token: Some("access-2".to_string()),
            refresh_token: Some("refresh-2".to_string()),
            ..session_expiring_in(60)
        };
        Self {
            refresh_result: Ok(renewed),
            sign_in_calls: AtomicUsize::new(0),
            sign_up_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_refresh_result(mut self, result: Result<SessionRecord, AuthError>) -> Self {
        self.refresh_result = result;
        self
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for MockIdentity {
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionRecord, AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.email == EMAIL && credentials.password == PASSWORD {
            Ok(session_expiring_in(60))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignupOutcome, AuthError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.email == EMAIL {
            return Err(AuthError::Rejected {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        Ok(SignupOutcome {
            user_id: Some("user-new".to_string()),
            email: Some(credentials.email.clone()),
            confirmation_required: true,
        })
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<SessionRecord, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_result.clone()
    }
}

/// Session store backed by a mutex-guarded slot.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<SessionRecord>>,
    fail_writes: bool,
    corrupt: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            slot: Mutex::new(Some(record)),
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn corrupt() -> Self {
        Self {
            corrupt: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<SessionRecord> {
        self.slot.lock().unwrap().clone()
    }
}

impl SessionStore for MemoryStore {
    async fn read(&self) -> Result<Option<SessionRecord>, PersistenceError> {
        if self.corrupt {
            return Err(PersistenceError::Corrupt("unexpected end of input".to_string()));
        }
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn write(&self, record: &SessionRecord) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Io(std::io::Error::other("disk full")));
        }
        *self.slot.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<(), PersistenceError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// Dispatcher that returns a canned reply (or error) and records each call.
pub struct MockDispatcher {
    result: Result<String, DispatchError>,
    delay: Option<std::time::Duration>,
    pub calls: Mutex<Vec<(ChatSessionId, String, String)>>,
}

impl MockDispatcher {
    pub fn replying(reply: &str) -> Self {
        Self {
            result: Ok(reply.to_string()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replies only after `delay` has elapsed.
    pub fn slow(reply: &str, delay: std::time::Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::replying(reply)
        }
    }

    pub fn failing(err: DispatchError) -> Self {
        Self {
            result: Err(err),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ChatDispatcher for MockDispatcher {
    async fn send(
        &self,
        session_id: &ChatSessionId,
        message: &str,
        access_token: &str,
    ) -> Result<String, DispatchError> {
        self.calls.lock().unwrap().push((
            *session_id,
            message.to_string(),
            access_token.to_string(),
        ));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}
