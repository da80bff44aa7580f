//! Chat transport port and the in-memory transcript.

pub mod dispatcher;
pub mod transcript;
