//! Local persistence and renewal of the auth session.
//!
//! `store` defines the `SessionStore` port; `service` implements the
//! save / load / refresh / clear state machine on top of it.

pub mod service;
pub mod store;
