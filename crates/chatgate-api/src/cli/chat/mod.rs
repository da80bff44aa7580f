//! Interactive terminal chat.
//!
//! Login prompt when no session is saved, welcome banner, readline input
//! with slash commands, a spinner while the webhook answers and markdown
//! rendering of replies. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
