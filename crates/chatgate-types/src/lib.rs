//! Shared domain types for chatgate.
//!
//! This crate contains the types passed between the session store, the
//! identity client, the webhook dispatcher and the front-ends: the session
//! record, chat transcript entries, auth outcomes, configuration and the
//! error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod session;
