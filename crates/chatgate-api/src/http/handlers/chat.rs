//! Chat handlers: transcript and message dispatch.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatgate_core::controller::SendOutcome;
use chatgate_types::chat::ChatMessage;
use chatgate_types::error::DispatchError;

use crate::http::error::AppError;
use crate::http::extract::ApiJson;
use crate::http::response::{ApiErrorDetail, ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Either `reply` or `error` is set. `messages` holds the two entries this
/// request appended, user first.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: Option<String>,
    pub error: Option<ApiErrorDetail>,
    pub messages: Vec<ChatMessage>,
}

/// GET /api/v1/messages - The transcript, oldest first.
pub async fn list_messages(State(state): State<AppState>) -> Json<ApiResponse<Vec<ChatMessage>>> {
    let timer = RequestTimer::start();
    let controller = state.controller.lock().await;
    let messages = controller.transcript().messages().to_vec();
    Json(timer.success(messages))
}

/// POST /api/v1/chat - Send one message and wait for the reply.
///
/// A dispatch failure is still a 200: the transcript gained an error entry
/// and the failure is reported in `error`. The send runs on its own task and
/// finishes even if the client goes away.
pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, AppError> {
    let timer = RequestTimer::start();
    let controller = state.controller.clone();

    let (outcome, messages) = tokio::spawn(async move {
        let mut controller = controller.lock_owned().await;
        let outcome = controller.send_message(&body.message).await?;
        let messages = controller.transcript().tail(2).to_vec();
        Ok::<_, AppError>((outcome, messages))
    })
    .await??;

    let response = match outcome {
        SendOutcome::Replied(reply) => ChatResponse {
            reply: Some(reply),
            error: None,
            messages,
        },
        SendOutcome::Failed(err) => ChatResponse {
            reply: None,
            error: Some(ApiErrorDetail {
                code: dispatch_error_code(&err).to_string(),
                message: err.to_string(),
            }),
            messages,
        },
    };

    Ok(Json(timer.success(response)))
}

fn dispatch_error_code(err: &DispatchError) -> &'static str {
    match err {
        DispatchError::MissingToken => "MISSING_TOKEN",
        DispatchError::Transport(_) => "WEBHOOK_UNREACHABLE",
        DispatchError::Status { .. } => "WEBHOOK_STATUS",
        DispatchError::Decode(_) => "WEBHOOK_BAD_REPLY",
        DispatchError::MissingOutput => "WEBHOOK_NO_OUTPUT",
    }
}
