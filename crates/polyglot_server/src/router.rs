//! HTTP routes.

use crate::AppState;
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use polyglot_core::{ChatReply, ChatRequest, ErrorBody};
use serde_json::json;
use tracing::{info, instrument, warn};

/// Path of the chat endpoint.
pub const CHAT_PATH: &str = "/api/chat";

/// Creates the relay router.
///
/// - `POST /api/chat` runs the fallback sequence for a [`ChatRequest`]
/// - any other method on `/api/chat` answers 405
/// - `GET /health` answers `{"status":"ok"}`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(CHAT_PATH, post(chat).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ErrorBody::new("Method not allowed")),
    )
}

/// Render the tutor prompt and run it through the model fallback order.
#[instrument(skip_all)]
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected chat request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    let prompt = state.prompt().render_request(&request);
    info!(
        history_len = request.history().len(),
        prompt_chars = prompt.len(),
        "Handling chat request"
    );

    match state
        .orchestrator()
        .run_until_cancelled(&prompt, state.shutdown())
        .await
    {
        Ok(text) => (StatusCode::OK, Json(ChatReply { text })).into_response(),
        Err(err) => {
            let status = if err.is_cancelled() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            warn!(status = status.as_u16(), error = %err.kind, "Chat request failed");
            (status, Json(ErrorBody::new(err.user_message()))).into_response()
        }
    }
}
