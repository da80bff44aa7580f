//! Request handlers for the browser front-end API.

pub mod auth;
pub mod chat;
pub mod session;

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use chatgate_core::controller::View;

use crate::state::{AppState, ConcreteController};

/// What the page needs to decide which view to draw.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub view: View,
    pub email: Option<String>,
    pub chat_session_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub title: String,
    pub assistant_name: String,
    pub welcome_message: String,
}

impl SessionView {
    pub fn from_controller(state: &AppState, controller: &ConcreteController) -> Self {
        Self {
            view: controller.view(),
            email: controller.email().map(str::to_string),
            chat_session_id: controller.chat_session_id().map(|id| id.to_string()),
            expires_at: controller.session().and_then(|s| s.expires_at),
            title: state.title().to_string(),
            assistant_name: state.config.assistant_name.clone(),
            welcome_message: state.config.welcome_message.clone(),
        }
    }
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
