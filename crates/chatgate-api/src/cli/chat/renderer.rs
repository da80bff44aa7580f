//! Terminal rendering of transcript entries.
//!
//! Replies are markdown rendered through `termimad`; dispatch errors are
//! printed plainly in red so they never look like an answer.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use chatgate_types::chat::{ChatMessage, MessageRole};

/// Characters shown per entry in `/history`.
const PREVIEW_CHARS: usize = 100;

pub struct ChatRenderer {
    skin: MadSkin,
    assistant_name: String,
}

impl ChatRenderer {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            assistant_name: assistant_name.into(),
        }
    }

    pub fn render_markdown(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    /// Print an assistant entry, styled by its kind.
    pub fn print_assistant(&self, message: &ChatMessage) {
        println!();
        if message.is_error() {
            println!(
                "  {} {}",
                style(&self.assistant_name).red().bold(),
                style(&message.content).red()
            );
        } else {
            println!("  {}", style(&self.assistant_name).cyan().bold());
            println!("{}", self.render_markdown(&message.content).trim_end());
        }
        println!();
    }

    /// One line per entry, oldest first.
    pub fn print_history(&self, messages: &[ChatMessage]) {
        println!();
        if messages.is_empty() {
            println!("  {}", style("No messages yet.").dim());
        }
        for message in messages {
            let label = match message.role {
                MessageRole::User => style("You".to_string()).green(),
                MessageRole::Assistant if message.is_error() => {
                    style(self.assistant_name.clone()).red()
                }
                MessageRole::Assistant => style(self.assistant_name.clone()).cyan(),
            };
            println!("  {} {}", label.bold(), preview(&message.content, PREVIEW_CHARS));
        }
        println!();
    }
}

/// Single-line preview, cut at `max_chars`.
pub fn preview(content: &str, max_chars: usize) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}
