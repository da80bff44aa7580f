//! Wire types for the hosted identity service (GoTrue-style auth API).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use chatgate_types::auth::SignupOutcome;
use chatgate_types::session::SessionRecord;

#[derive(Debug, Serialize)]
pub(crate) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

/// Token grant answer. `expires_at` is unix seconds.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<UserResponse>,
}

impl SessionResponse {
    /// Convert into a record. `saved_at` is left for the persistence layer.
    pub fn into_record(self, now: DateTime<Utc>) -> SessionRecord {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

        SessionRecord {
            user_id: self.user.as_ref().map(|u| u.id.clone()),
            email: self.user.and_then(|u| u.email),
            access_token: Some(self.access_token),
            refresh_token: self.refresh_token,
            expires_at,
            saved_at: None,
        }
    }
}

/// Sign-up answers with a session when the project auto-confirms users and
/// with a bare user when a confirmation email was sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignupResponse {
    Session(SessionResponse),
    User(UserResponse),
}

impl From<SignupResponse> for SignupOutcome {
    fn from(resp: SignupResponse) -> Self {
        match resp {
            SignupResponse::Session(session) => {
                let user = session.user;
                SignupOutcome {
                    user_id: user.as_ref().map(|u| u.id.clone()),
                    email: user.and_then(|u| u.email),
                    confirmation_required: false,
                }
            }
            SignupResponse::User(user) => SignupOutcome {
                confirmation_required: user.email_confirmed_at.is_none(),
                user_id: Some(user.id),
                email: user.email,
            },
        }
    }
}

/// Error body. Different endpoints and versions use different field names.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Most descriptive message available.
    pub fn message(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }

    /// Whether the service says the email/password pair is wrong.
    pub fn is_invalid_credentials(&self) -> bool {
        self.error_code.as_deref() == Some("invalid_credentials")
            || self
                .message()
                .is_some_and(|m| m.eq_ignore_ascii_case("invalid login credentials"))
    }
}
