//! Business logic and port trait definitions for chatgate.
//!
//! This crate defines the "ports" (identity provider, session store, chat
//! dispatcher) that the infrastructure layer implements, plus the logic that
//! sits on top of them: the session persistence state machine, the auth
//! service and the chat controller. It depends only on `chatgate-types` --
//! never on `chatgate-infra` or any IO crate.

pub mod auth;
pub mod chat;
pub mod controller;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
