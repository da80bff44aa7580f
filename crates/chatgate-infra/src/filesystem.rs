//! Data directory layout.

use std::path::{Path, PathBuf};

use chatgate_types::config::AppConfig;

/// Default session file name inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATGATE_DATA_DIR` environment variable
/// 2. `~/.chatgate`
/// 3. `./.chatgate`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATGATE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatgate");
    }

    PathBuf::from(".chatgate")
}

/// Where the session record lives: the configured path, else
/// `{data_dir}/session.json`.
pub fn session_path(config: &AppConfig, data_dir: &Path) -> PathBuf {
    config
        .session_file
        .clone()
        .unwrap_or_else(|| data_dir.join(SESSION_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path_default() {
        let config = AppConfig::default();
        assert_eq!(
            session_path(&config, Path::new("/home/user/.chatgate")),
            PathBuf::from("/home/user/.chatgate/session.json")
        );
    }

    #[test]
    fn test_session_path_override() {
        let config = AppConfig {
            session_file: Some(PathBuf::from("/tmp/auth_state.json")),
            ..AppConfig::default()
        };
        assert_eq!(
            session_path(&config, Path::new("/home/user/.chatgate")),
            PathBuf::from("/tmp/auth_state.json")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is the only one touching CHATGATE_DATA_DIR and restores it.
        unsafe {
            std::env::set_var("CHATGATE_DATA_DIR", "/tmp/test-chatgate");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-chatgate"));
        unsafe {
            std::env::remove_var("CHATGATE_DATA_DIR");
        }
    }
}
