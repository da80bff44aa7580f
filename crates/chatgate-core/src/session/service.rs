//! Session persistence state machine.
//!
//! ```text
//! Absent --save--> Valid --time passes--> Expired --refresh ok--> Valid
//!                    |                       |
//!                    +------clear------------+--refresh fails--> Absent
//! ```
//!
//! `load()` runs once at startup. An expired record triggers exactly one
//! refresh call; there is no retry and no background renewal.

use std::sync::Arc;

use chatgate_types::error::PersistenceError;
use chatgate_types::session::{SessionRecord, SessionState};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::store::SessionStore;
use crate::auth::provider::IdentityProvider;

/// Saves, loads, renews and clears the persisted session.
pub struct SessionPersistence<S: SessionStore, P: IdentityProvider> {
    store: S,
    provider: Arc<P>,
}

impl<S: SessionStore, P: IdentityProvider> SessionPersistence<S, P> {
    pub fn new(store: S, provider: Arc<P>) -> Self {
        Self { store, provider }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `record`, overwriting whatever was stored.
    ///
    /// Stamps `saved_at` and returns the record exactly as written.
    pub async fn save(&self, record: SessionRecord) -> Result<SessionRecord, PersistenceError> {
        let record = record.stamped(Utc::now());
        self.store.write(&record).await?;
        debug!(email = ?record.email, "session saved");
        Ok(record)
    }

    /// Load the stored record, renewing it first if it has expired.
    ///
    /// Returns `None` when nothing is stored, the file is corrupt, or an
    /// expired record could not be renewed.
    pub async fn load(&self) -> Option<SessionRecord> {
        self.load_at(Utc::now()).await
    }

    /// [`load`](Self::load) against an explicit clock reading.
    pub async fn load_at(&self, now: DateTime<Utc>) -> Option<SessionRecord> {
        let record = match self.store.read().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("no stored session");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session file");
                return None;
            }
        };

        match record.state_at(now) {
            SessionState::Valid => Some(record),
            SessionState::Expired => {
                info!(email = ?record.email, "stored session expired, refreshing");
                self.refresh(&record).await
            }
        }
    }

    /// Read the stored record without refreshing it.
    pub async fn peek(&self) -> Result<Option<SessionRecord>, PersistenceError> {
        self.store.read().await
    }

    /// Renew `record` with its refresh token.
    ///
    /// One provider call at most. On success the renewed record replaces the
    /// stored one; user id and email carry over when the provider omits them.
    /// On failure the stale record is removed and `None` is returned so the
    /// caller falls back to the login view.
    pub async fn refresh(&self, record: &SessionRecord) -> Option<SessionRecord> {
        let Some(refresh_token) = record.refresh_token.as_deref().filter(|t| !t.is_empty())
        else {
            info!("stored session has no refresh token");
            self.discard_stale().await;
            return None;
        };

        let renewed = match self.provider.refresh_session(refresh_token).await {
            Ok(renewed) => renewed,
            Err(e) => {
                warn!(error = %e, "session refresh failed");
                self.discard_stale().await;
                return None;
            }
        };

        let renewed = SessionRecord {
            user_id: renewed.user_id.or_else(|| record.user_id.clone()),
            email: renewed.email.or_else(|| record.email.clone()),
            ..renewed
        };

        match self.save(renewed.clone()).await {
            Ok(saved) => {
                info!(email = ?saved.email, "session refreshed");
                Some(saved)
            }
            Err(e) => {
                // The tokens are still good for this process; only the next
                // start loses them.
                warn!(error = %e, "refreshed session could not be saved");
                Some(renewed.stamped(Utc::now()))
            }
        }
    }

    /// Delete the stored record. Idempotent.
    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.store.remove().await?;
        debug!("session cleared");
        Ok(())
    }

    async fn discard_stale(&self) {
        if let Err(e) = self.store.remove().await {
            warn!(error = %e, "failed to remove stale session");
        }
    }
}
