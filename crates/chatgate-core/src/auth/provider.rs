//! IdentityProvider trait definition.
//!
//! The identity service is an external collaborator; this trait is the only
//! surface the rest of the workspace sees. Uses the same RPITIT pattern as
//! the other ports.

use chatgate_types::auth::{Credentials, SignupOutcome};
use chatgate_types::error::AuthError;
use chatgate_types::session::SessionRecord;

/// Operations consumed from the hosted identity service.
///
/// Implementations live in chatgate-infra (e.g., `HostedIdentityClient`).
/// Every call is single-shot; implementations must not retry.
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password, returning a fresh session.
    fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<SessionRecord, AuthError>> + Send;

    /// Register a new user. Never yields a usable session.
    fn sign_up(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<SignupOutcome, AuthError>> + Send;

    /// Exchange a refresh token for a renewed session.
    fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> impl std::future::Future<Output = Result<SessionRecord, AuthError>> + Send;
}
