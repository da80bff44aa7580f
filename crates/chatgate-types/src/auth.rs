//! Auth request and outcome types.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Email/password pair submitted by a login or signup form.
/// Absent fields deserialize as empty and fail validation later.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful sign-up.
///
/// Sign-up never yields a usable session here; the user logs in afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupOutcome {
    pub user_id: Option<String>,
    pub email: Option<String>,
    /// The provider sent a confirmation email that must be acted on first.
    pub confirmation_required: bool,
}
