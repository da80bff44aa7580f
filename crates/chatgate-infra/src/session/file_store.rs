//! JSON file implementation of [`SessionStore`].
//!
//! The file format is internal; there is no cross-version guarantee. Writes
//! go to a temp file in the same directory which is then renamed over the
//! target, so a crash mid-write leaves either the old or the new record.
//! On unix the file is readable by the owner only.
//!
//! No locking: a second process writing the same file can lose an update.

use std::io::Write;
use std::path::{Path, PathBuf};

use chatgate_core::session::store::SessionStore;
use chatgate_types::error::PersistenceError;
use chatgate_types::session::SessionRecord;

/// Stores the session record at a fixed path.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    async fn read(&self) -> Result<Option<SessionRecord>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    async fn write(&self, record: &SessionRecord) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(record).map_err(std::io::Error::other)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(std::io::Error::other)??;

        tracing::debug!(path = %self.path.display(), "session file written");
        Ok(())
    }

    async fn remove(&self) -> Result<(), PersistenceError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // NamedTempFile is created 0600 on unix.
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
