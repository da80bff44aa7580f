//! Login, signup and logout handlers.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatgate_core::controller::Notice;
use chatgate_types::auth::{Credentials, SignupOutcome};

use super::SessionView;
use crate::http::error::AppError;
use crate::http::extract::ApiJson;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub session: SessionView,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub outcome: SignupOutcome,
    pub notices: Vec<Notice>,
}

/// POST /api/v1/auth/login
///
/// Runs on its own task so a client that disconnects cannot leave a saved
/// session behind an auth view.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let timer = RequestTimer::start();

    let response = tokio::spawn(async move {
        let mut controller = state.controller.clone().lock_owned().await;
        let notices = controller.login(&body.email, &body.password).await?;
        let session = SessionView::from_controller(&state, &controller);
        Ok::<_, AppError>(AuthResponse { session, notices })
    })
    .await??;

    Ok(Json(timer.success(response)))
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> Result<Json<ApiResponse<SignupResponse>>, AppError> {
    let timer = RequestTimer::start();
    let controller = state.controller.lock().await;

    let outcome = controller
        .signup(&body.email, &body.password, &body.confirm_password)
        .await?;

    let notices = vec![if outcome.confirmation_required {
        Notice::info("Account created. Check your inbox to confirm your email, then log in.")
    } else {
        Notice::info("Account created. You can log in now.")
    }];

    Ok(Json(timer.success(SignupResponse { outcome, notices })))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let timer = RequestTimer::start();

    let response = tokio::spawn(async move {
        let mut controller = state.controller.clone().lock_owned().await;
        let notices = controller.logout().await;
        let session = SessionView::from_controller(&state, &controller);
        AuthResponse { session, notices }
    })
    .await?;

    Ok(Json(timer.success(response)))
}
