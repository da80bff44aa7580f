//! Browser front-end.
//!
//! One HTML page at `/` plus a JSON API under `/api/v1/` that drives the
//! same controller as the terminal chat. Responses use an envelope format.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
