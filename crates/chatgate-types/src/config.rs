//! Application configuration types.
//!
//! `AppConfig` is the optional `config.toml` in the data directory. Every
//! field has a default so a missing or partial file still yields a usable
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for chatgate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the three secret files and the optional greeting.
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_secrets_dir")]
    pub secrets_dir: PathBuf,

    /// Session file location. `None` means `{data_dir}/session.json`; a
    /// relative path is taken relative to the data directory.
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Timeout applied to identity and webhook requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Label shown next to assistant replies.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// First assistant line shown when the chat view opens (display only).
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

fn default_secrets_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_assistant_name() -> String {
    "Assistant".to_string()
}

fn default_welcome_message() -> String {
    "I'm here to help. Send me what you'd like to discuss.".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secrets_dir: default_secrets_dir(),
            session_file: None,
            request_timeout_secs: default_request_timeout_secs(),
            assistant_name: default_assistant_name(),
            welcome_message: default_welcome_message(),
        }
    }
}
