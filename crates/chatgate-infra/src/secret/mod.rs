//! Service credentials: identity-service URL and key, webhook URL.
//!
//! Resolution order per value:
//! 1. environment variable (`CHATGATE_IDENTITY_URL`, `CHATGATE_IDENTITY_KEY`,
//!    `CHATGATE_WEBHOOK_URL`)
//! 2. plaintext file in the secrets directory
//!
//! A value found nowhere is a fatal configuration error.

pub mod files;

pub use files::{ServiceCredentials, load_credentials, read_greeting};
