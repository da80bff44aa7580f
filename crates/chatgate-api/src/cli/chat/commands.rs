//! Slash command parsing for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Clear the terminal screen. The transcript is kept.
    Clear,
    /// Show the transcript so far.
    History(Option<usize>),
    /// Show session details.
    Session,
    /// Log out and leave the chat.
    Logout,
    Exit,
    Unknown(String),
}

/// Parse user input as a slash command. `None` for ordinary messages.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/history" => match arg.map(str::parse::<usize>) {
            None => ChatCommand::History(None),
            Some(Ok(n)) if n > 0 => ChatCommand::History(Some(n)),
            Some(_) => ChatCommand::Unknown("/history takes a positive number".to_string()),
        },
        "/session" => ChatCommand::Session,
        "/logout" => ChatCommand::Logout,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}       Show this help message", style("/help").cyan());
    println!("  {}      Clear the screen", style("/clear").cyan());
    println!("  {} Show the conversation (optionally the last N messages)", style("/history [N]").cyan());
    println!("  {}    Show session details", style("/session").cyan());
    println!("  {}     Log out and end the chat", style("/logout").cyan());
    println!("  {}       End the chat, stay logged in", style("/exit").cyan());
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
