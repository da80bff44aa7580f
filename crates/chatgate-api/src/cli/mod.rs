//! CLI command definitions for the `chatgate` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod auth;
pub mod chat;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Log in and chat with your assistant from the terminal or a browser tab.
#[derive(Parser)]
#[command(name = "chatgate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding `config.toml` and the session file.
    #[arg(long, global = true, env = "CHATGATE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password and save the session.
    Login {
        /// Email address (prompted when omitted).
        #[arg(long)]
        email: Option<String>,
    },

    /// Create a new account.
    Signup {
        /// Email address (prompted when omitted).
        #[arg(long)]
        email: Option<String>,
    },

    /// Forget the saved session.
    Logout,

    /// Show the saved session without refreshing it.
    Status,

    /// Start an interactive chat (logs in first if needed).
    Chat,

    /// Serve the browser front-end on a local port.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8501")]
        port: u16,

        /// Host address to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
