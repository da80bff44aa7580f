//! File-backed credential store.
//!
//! Each secret is one trimmed plaintext file. The key is wrapped in
//! [`SecretString`] as soon as it is read and is only exposed when building
//! request headers.

use std::path::Path;

use chatgate_types::error::ConfigError;
use secrecy::SecretString;
use tracing::debug;

pub const IDENTITY_URL_FILE: &str = "IDENTITY_URL.txt";
pub const IDENTITY_KEY_FILE: &str = "IDENTITY_KEY.txt";
pub const WEBHOOK_URL_FILE: &str = "WEBHOOK_URL.txt";
pub const GREETING_FILE: &str = "greeting.txt";

const IDENTITY_URL_ENV: &str = "CHATGATE_IDENTITY_URL";
const IDENTITY_KEY_ENV: &str = "CHATGATE_IDENTITY_KEY";
const WEBHOOK_URL_ENV: &str = "CHATGATE_WEBHOOK_URL";

/// Everything needed to reach the two external services.
pub struct ServiceCredentials {
    pub identity_url: String,
    pub identity_key: SecretString,
    pub webhook_url: String,
}

/// Read the three credentials from `dir`, with environment overrides.
pub async fn load_credentials(dir: &Path) -> Result<ServiceCredentials, ConfigError> {
    load_credentials_with(dir, |key| std::env::var(key).ok()).await
}

/// [`load_credentials`] with an explicit environment lookup.
pub async fn load_credentials_with<F>(dir: &Path, env: F) -> Result<ServiceCredentials, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let identity_url = resolve(dir, IDENTITY_URL_FILE, IDENTITY_URL_ENV, &env).await?;
    let identity_key = resolve(dir, IDENTITY_KEY_FILE, IDENTITY_KEY_ENV, &env).await?;
    let webhook_url = resolve(dir, WEBHOOK_URL_FILE, WEBHOOK_URL_ENV, &env).await?;

    ensure_http_url("identity url", &identity_url)?;
    ensure_http_url("webhook url", &webhook_url)?;

    Ok(ServiceCredentials {
        identity_url,
        identity_key: SecretString::from(identity_key),
        webhook_url,
    })
}

/// Read the optional chat title from `{dir}/greeting.txt`.
pub async fn read_greeting(dir: &Path) -> Option<String> {
    let content = tokio::fs::read_to_string(dir.join(GREETING_FILE)).await.ok()?;
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

async fn resolve<F>(dir: &Path, file: &str, env_key: &str, env: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env(env_key).map(|v| v.trim().to_string())
        && !value.is_empty()
    {
        debug!(key = env_key, "credential taken from environment");
        return Ok(value);
    }

    let path = dir.join(file);
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::MissingSecretFile(path));
        }
        Err(err) => {
            return Err(ConfigError::Unreadable {
                path,
                message: err.to_string(),
            });
        }
    };

    let value = content.trim();
    if value.is_empty() {
        return Err(ConfigError::EmptySecret(path));
    }
    Ok(value.to_string())
}

fn ensure_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("'{value}' is not an http(s) URL"),
        })
    }
}
