//! Welcome banner shown when the chat view opens.

use console::style;

/// Print the title, the logged-in email and the short chat session id.
pub fn print_welcome_banner(title: &str, email: Option<&str>, session_id: &str) {
    println!();
    println!("  {}", style(title).cyan().bold());
    println!();
    if let Some(email) = email {
        println!("  {}  {}", style("Logged in as:").bold(), style(email).dim());
    }
    println!(
        "  {}       {}",
        style("Session:").bold(),
        style(short_id(session_id)).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

/// First eight characters of an id, for display.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0192f4c3-7d1e-7abc-9def-0123456789ab"), "0192f4c3");
        assert_eq!(short_id("abc"), "abc");
    }
}
