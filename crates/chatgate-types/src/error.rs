use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration errors. Fatal: the process halts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("secret file {} does not exist", .0.display())]
    MissingSecretFile(PathBuf),

    #[error("secret file {} is empty", .0.display())]
    EmptySecret(PathBuf),

    #[error("failed to read {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Errors from the identity service or from validating auth forms.
///
/// All of these are recoverable: the user stays on (or returns to) the
/// authentication view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("identity service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("identity service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed identity service response: {0}")]
    MalformedResponse(String),
}

/// Session file errors. Non-fatal: the session is simply not saved or loaded.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("session file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(String),
}

/// Webhook call failures, kept apart from the transcript content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no access token available, please log in again")]
    MissingToken,

    #[error("failed to reach the chat backend: {0}")]
    Transport(String),

    #[error("chat backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("chat backend returned a non-JSON reply: {0}")]
    Decode(String),

    #[error("chat backend reply has no output")]
    MissingOutput,
}

/// Errors raised by the controller before any external call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("not logged in")]
    NotLoggedIn,

    #[error("message is empty")]
    EmptyMessage,

    #[error(transparent)]
    Auth(#[from] AuthError),
}
