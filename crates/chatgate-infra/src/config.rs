//! `config.toml` loading.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use chatgate_types::config::AppConfig;

pub const CONFIG_FILE: &str = "config.toml";

/// Read `{data_dir}/config.toml`.
///
/// An absent, unreadable or invalid file yields [`AppConfig::default()`]; only
/// the last two are logged as warnings. A relative `session_file` is taken
/// relative to `data_dir`, and a zero timeout is replaced by the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let path = data_dir.join(CONFIG_FILE);

    let mut config = match tokio::fs::read_to_string(&path).await {
        Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "config file is not valid TOML, using defaults");
            AppConfig::default()
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            AppConfig::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config file unreadable, using defaults");
            AppConfig::default()
        }
    };

    normalize(&mut config, data_dir);
    config
}

fn normalize(config: &mut AppConfig, data_dir: &Path) {
    if let Some(file) = config.session_file.take() {
        config.session_file = Some(if file.is_relative() {
            data_dir.join(file)
        } else {
            file
        });
    }

    if config.request_timeout_secs == 0 {
        warn!("request_timeout_secs must be positive, using the default");
        config.request_timeout_secs = AppConfig::default().request_timeout_secs;
    }
}
