//! Session handler.

use axum::Json;
use axum::extract::State;

use super::SessionView;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/session - Current view and session details.
pub async fn get_session(State(state): State<AppState>) -> Json<ApiResponse<SessionView>> {
    let timer = RequestTimer::start();
    let controller = state.controller.lock().await;
    let view = SessionView::from_controller(&state, &controller);
    Json(timer.success(view))
}
