//! Shared reqwest client construction.

use std::time::Duration;

use chatgate_types::error::ConfigError;

/// Build the HTTP client used for both the identity service and the webhook.
///
/// One connection pool for the process; every request is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("chatgate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::Invalid {
            key: "http client".to_string(),
            message: e.to_string(),
        })
}

/// Keep error bodies short enough for a single log or UI line.
pub(crate) fn truncate_body(body: &str, max_chars: usize) -> String {
    let body = body.trim();
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("  short  ", 10), "short");
        assert_eq!(truncate_body("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_body("đăng nhập", 4), "đăng...");
    }
}
