//! SessionStore trait definition.
//!
//! Storage for exactly one `SessionRecord`. Single process, no concurrent
//! writers assumed: implementations do no locking.

use chatgate_types::error::PersistenceError;
use chatgate_types::session::SessionRecord;

/// Durable slot holding the current session record.
///
/// Implementations live in chatgate-infra (e.g., `FileSessionStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Read the stored record. `Ok(None)` when nothing is stored.
    fn read(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<SessionRecord>, PersistenceError>> + Send;

    /// Replace any stored record with `record`.
    fn write(
        &self,
        record: &SessionRecord,
    ) -> impl std::future::Future<Output = Result<(), PersistenceError>> + Send;

    /// Delete the stored record. Succeeds when nothing is stored.
    fn remove(&self) -> impl std::future::Future<Output = Result<(), PersistenceError>> + Send;
}
