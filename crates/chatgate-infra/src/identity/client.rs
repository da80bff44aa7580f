//! HostedIdentityClient -- [`IdentityProvider`] over the hosted auth REST API.
//!
//! Endpoints (relative to the project URL):
//! - `POST /auth/v1/token?grant_type=password`
//! - `POST /auth/v1/token?grant_type=refresh_token`
//! - `POST /auth/v1/signup`
//!
//! The project key is sent both as `apikey` and as the bearer token. It is
//! held in a [`SecretString`] and only exposed while building headers.

use chrono::Utc;
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use chatgate_core::auth::provider::IdentityProvider;
use chatgate_types::auth::{Credentials, SignupOutcome};
use chatgate_types::error::AuthError;
use chatgate_types::session::SessionRecord;

use super::types::{ErrorResponse, PasswordGrant, RefreshGrant, SessionResponse, SignupResponse};
use crate::http::truncate_body;

const MAX_ERROR_CHARS: usize = 200;

/// Client for the hosted identity service.
///
/// Does not derive Debug; the key never reaches logs.
pub struct HostedIdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

/// Which call failed; decides how a 4xx is classified.
#[derive(Clone, Copy)]
enum Call {
    Password,
    Refresh,
    Signup,
}

impl HostedIdentityClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: SecretString) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, AuthError> {
        let key = self.api_key.expose_secret();
        self.client
            .post(self.url(path))
            .header("apikey", key)
            .bearer_auth(key)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))
    }

    async fn session_from(&self, response: Response, call: Call) -> Result<SessionRecord, AuthError> {
        let response = check_status(response, call).await?;
        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        Ok(session.into_record(Utc::now()))
    }
}

impl IdentityProvider for HostedIdentityClient {
    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionRecord, AuthError> {
        debug!(email = %credentials.email, "password grant");
        let grant = PasswordGrant {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self.post("/auth/v1/token?grant_type=password", &grant).await?;
        self.session_from(response, Call::Password).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignupOutcome, AuthError> {
        debug!(email = %credentials.email, "sign-up request");
        let grant = PasswordGrant {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self.post("/auth/v1/signup", &grant).await?;
        let response = check_status(response, Call::Signup).await?;
        let body: SignupResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        Ok(body.into())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionRecord, AuthError> {
        debug!("refresh grant");
        let grant = RefreshGrant { refresh_token };
        let response = self
            .post("/auth/v1/token?grant_type=refresh_token", &grant)
            .await?;
        self.session_from(response, Call::Refresh).await
    }
}

async fn check_status(response: Response, call: Call) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = ErrorResponse::parse(&body);

    if matches!(call, Call::Password)
        && (status == StatusCode::UNAUTHORIZED || error.is_invalid_credentials())
    {
        return Err(AuthError::InvalidCredentials);
    }

    let message = match error.message() {
        Some(message) => message.to_string(),
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        None => truncate_body(&body, MAX_ERROR_CHARS),
    };

    if status.is_server_error() {
        return Err(AuthError::Unavailable(format!("HTTP {}: {message}", status.as_u16())));
    }

    Err(AuthError::Rejected {
        status: status.as_u16(),
        message,
    })
}
