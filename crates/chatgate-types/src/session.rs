//! Session record type shared by the live session and its on-disk form.
//!
//! A single `SessionRecord` is produced by the identity client, held by the
//! controller and written to the session file. Every field is optional because
//! the identity service may omit parts of the session and older files may be
//! missing fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Authentication state for the logged-in user.
///
/// Created on successful login, overwritten on successful refresh, deleted on
/// logout and read once at process start.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

// Tokens must never reach logs, so Debug is written by hand.
impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRecord")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}

/// Where a stored record sits in the persistence lifecycle.
///
/// `Absent` is represented by the absence of a record, so only the two
/// states a record can be in are modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Valid,
    Expired,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Valid => write!(f, "valid"),
            SessionState::Expired => write!(f, "expired"),
        }
    }
}

impl SessionRecord {
    /// Lifecycle state of this record at `now`.
    ///
    /// A record without `expires_at` never expires.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        match self.expires_at {
            Some(expires_at) if expires_at <= now => SessionState::Expired,
            _ => SessionState::Valid,
        }
    }

    /// Whether the access token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == SessionState::Expired
    }

    /// Whether the record carries a refresh token to renew it with.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// Whether the record identifies a user, which is what the chat view requires.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Return a copy stamped with the given save time.
    pub fn stamped(mut self, saved_at: DateTime<Utc>) -> Self {
        self.saved_at = Some(saved_at);
        self
    }
}
