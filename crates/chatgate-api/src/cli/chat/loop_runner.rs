//! Main chat loop orchestration.
//!
//! Restores (or prompts for) a session, prints the banner and welcome
//! message, then reads lines until exit. Each message goes through the
//! controller; the terminal only renders what it reports.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use chatgate_core::controller::{SendOutcome, View};
use chatgate_types::chat::ChatMessage;
use chatgate_types::error::ControllerError;

use crate::cli::auth::{print_notices, prompt_login};
use crate::state::AppState;

use super::banner::{print_welcome_banner, short_id};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat until the user exits or logs out.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut controller = state.controller.lock().await;

    if controller.restore().await == View::Auth {
        println!();
        println!("  {}", style("Not logged in. Please log in to continue.").dim());
        println!();
        if !prompt_login(&mut controller).await? {
            println!("  {}", style("Giving up after too many attempts.").dim());
            return Ok(());
        }
    }

    let session_id = controller
        .chat_session_id()
        .map(|id| id.to_string())
        .unwrap_or_default();
    print_welcome_banner(state.title(), controller.email(), &session_id);

    let renderer = ChatRenderer::new(state.config.assistant_name.clone());
    renderer.print_assistant(&ChatMessage::assistant(state.config.welcome_message.clone()));

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::History(limit) => {
                    let transcript = controller.transcript();
                    let messages = match limit {
                        Some(n) => transcript.tail(n),
                        None => transcript.messages(),
                    };
                    renderer.print_history(messages);
                }
                ChatCommand::Session => {
                    println!();
                    println!("  {}  {}", style("Email:").bold(), controller.email().unwrap_or("-"));
                    println!("  {}  {}", style("Session:").bold(), short_id(&session_id));
                    println!("  {}  {}", style("Turns:").bold(), controller.transcript().turns());
                    if let Some(expires) = controller.session().and_then(|s| s.expires_at) {
                        println!(
                            "  {}  {}",
                            style("Expires:").bold(),
                            expires.format("%Y-%m-%d %H:%M:%S UTC")
                        );
                    }
                    println!();
                }
                ChatCommand::Logout => {
                    let notices = controller.logout().await;
                    print_notices(&notices);
                    break;
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let spinner = thinking_spinner()?;
        let result = controller.send_message(&text).await;
        spinner.finish_and_clear();

        match result {
            Ok(outcome) => {
                if let Some(entry) = controller.transcript().last() {
                    renderer.print_assistant(entry);
                }
                if let SendOutcome::Failed(err) = outcome {
                    debug!(error = %err, "message not answered");
                    println!(
                        "  {}\n",
                        style("Type a message to retry, /exit to quit.").dim()
                    );
                }
            }
            Err(ControllerError::EmptyMessage) => continue,
            Err(e) => {
                eprintln!("\n  {} {e}\n", style("!").red().bold());
                break;
            }
        }
    }

    chat_input.flush();
    Ok(())
}

fn thinking_spinner() -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")?);
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}
