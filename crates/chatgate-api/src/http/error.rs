//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatgate_types::error::{AuthError, ControllerError};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Controller(ControllerError),
    /// Request body that could not be read as the expected JSON.
    InvalidBody { status: StatusCode, message: String },
    Internal(String),
}

impl From<ControllerError> for AppError {
    fn from(e: ControllerError) -> Self {
        AppError::Controller(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("request task failed: {e}"))
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Controller(ControllerError::NotLoggedIn) => {
                (StatusCode::UNAUTHORIZED, "NOT_LOGGED_IN", self.message())
            }
            AppError::Controller(ControllerError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.message())
            }
            AppError::Controller(ControllerError::Auth(auth)) => match auth {
                AuthError::MissingField(_) | AuthError::PasswordMismatch => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.message())
                }
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", self.message())
                }
                AuthError::Rejected { message, .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "AUTH_REJECTED", message.clone())
                }
                AuthError::Unavailable(_) => {
                    (StatusCode::BAD_GATEWAY, "IDENTITY_UNAVAILABLE", self.message())
                }
                AuthError::MalformedResponse(_) => {
                    (StatusCode::BAD_GATEWAY, "IDENTITY_BAD_RESPONSE", self.message())
                }
            },
            AppError::InvalidBody { status, message } => (*status, "VALIDATION_ERROR", message.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Controller(e) => e.to_string(),
            AppError::InvalidBody { message, .. } | AppError::Internal(message) => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        tracing::debug!(%status, code, "request failed");
        let request_id = uuid::Uuid::now_v7().to_string();
        (status, Json(ApiResponse::error(code, &message, request_id, 0))).into_response()
    }
}
