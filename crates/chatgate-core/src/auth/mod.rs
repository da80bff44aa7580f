//! Authentication against the hosted identity service.
//!
//! `provider` holds the `IdentityProvider` port; `service` validates form
//! input and delegates to it.

pub mod provider;
pub mod service;
