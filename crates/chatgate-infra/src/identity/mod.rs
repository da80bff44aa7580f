//! Hosted identity service adapter.

pub mod client;
pub(crate) mod types;

pub use client::HostedIdentityClient;
