//! Auth service: form validation in front of the identity provider.
//!
//! Login and signup are single-shot. Every failure comes back as a tagged
//! `AuthError` for the front-end to render; nothing here panics or retries.

use std::sync::Arc;

use chatgate_types::auth::{Credentials, SignupOutcome};
use chatgate_types::error::AuthError;
use chatgate_types::session::SessionRecord;
use tracing::{info, warn};

use super::provider::IdentityProvider;

/// Validates login/signup input and delegates to an [`IdentityProvider`].
///
/// Does not persist anything; the controller decides what to save.
pub struct AuthService<P: IdentityProvider> {
    provider: Arc<P>,
}

impl<P: IdentityProvider> AuthService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Sign in with email and password.
    ///
    /// A provider answer without a user id is treated as malformed, since the
    /// chat view cannot be entered without one.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionRecord, AuthError> {
        let credentials = validated(email, password)?;

        match self.provider.sign_in_with_password(&credentials).await {
            Ok(record) if record.is_authenticated() => {
                info!(email = %credentials.email, "login succeeded");
                Ok(record)
            }
            Ok(_) => Err(AuthError::MalformedResponse(
                "session has no user".to_string(),
            )),
            Err(e) => {
                warn!(email = %credentials.email, error = %e, "login failed");
                Err(e)
            }
        }
    }

    /// Register a new account.
    ///
    /// Requires `password == confirm_password`. The account may need email
    /// confirmation before the first login, depending on the provider.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SignupOutcome, AuthError> {
        let credentials = validated(email, password)?;
        if confirm_password.is_empty() {
            return Err(AuthError::MissingField("password confirmation"));
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let outcome = self.provider.sign_up(&credentials).await.inspect_err(|e| {
            warn!(email = %credentials.email, error = %e, "signup failed");
        })?;
        info!(
            email = %credentials.email,
            confirmation_required = outcome.confirmation_required,
            "signup succeeded"
        );
        Ok(outcome)
    }
}

fn validated(email: &str, password: &str) -> Result<Credentials, AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    Ok(Credentials::new(email, password))
}
