//! Infrastructure adapters for chatgate.
//!
//! Implements the ports from `chatgate-core` against real IO: the session
//! file, the hosted identity service and the chat webhook. Also owns startup
//! concerns: data directory, `config.toml` and the secret files.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod identity;
pub mod secret;
pub mod session;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test_server;
