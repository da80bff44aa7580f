//! Session status command.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatgate_types::session::{SessionRecord, SessionState};

use crate::state::AppState;

/// Display the saved session. Never refreshes or rewrites it.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let stored = state.controller.lock().await.persistence().peek().await;
    let (record, read_error) = match stored {
        Ok(record) => (record, None),
        Err(e) => (None, Some(e.to_string())),
    };
    let label = state_label(record.as_ref(), Utc::now());

    if json {
        let out = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "session_file": state.session_path.display().to_string(),
            "state": label,
            "email": record.as_ref().and_then(|r| r.email.clone()),
            "user_id": record.as_ref().and_then(|r| r.user_id.clone()),
            "expires_at": record.as_ref().and_then(|r| r.expires_at),
            "saved_at": record.as_ref().and_then(|r| r.saved_at),
            "error": read_error,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} chatgate v{}", style("⚡").bold(), env!("CARGO_PKG_VERSION"));
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let state_color = match label {
        "valid" => Color::Green,
        "expired" => Color::Yellow,
        _ => Color::DarkGrey,
    };
    table.add_row(vec![Cell::new("Session"), Cell::new(label).fg(state_color)]);

    if let Some(record) = &record {
        table.add_row(vec![Cell::new("Email"), Cell::new(or_dash(record.email.as_deref()))]);
        table.add_row(vec![Cell::new("User id"), Cell::new(or_dash(record.user_id.as_deref()))]);
        table.add_row(vec![Cell::new("Expires"), Cell::new(format_time(record.expires_at))]);
        table.add_row(vec![Cell::new("Saved"), Cell::new(format_time(record.saved_at))]);
        table.add_row(vec![
            Cell::new("Refreshable"),
            Cell::new(if record.can_refresh() { "yes" } else { "no" }),
        ]);
    }
    table.add_row(vec![Cell::new("Session file"), Cell::new(state.session_path.display())]);
    table.add_row(vec![Cell::new("Data dir"), Cell::new(state.data_dir.display())]);
    println!("{table}");

    if let Some(err) = read_error {
        println!();
        println!("  {} {err}", style("!").yellow().bold());
    }
    println!();
    Ok(())
}

/// `absent`, `valid` or `expired`.
fn state_label(record: Option<&SessionRecord>, now: DateTime<Utc>) -> &'static str {
    match record.map(|r| r.state_at(now)) {
        None => "absent",
        Some(SessionState::Valid) => "valid",
        Some(SessionState::Expired) => "expired",
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn format_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}
