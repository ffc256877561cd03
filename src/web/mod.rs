//! Inbound HTTP surface: the chat page and its JSON API.
//!
//! One in-memory session per process; the shared `Mutex` serializes user
//! actions so at most one turn is in flight at a time.

use crate::session::ChatSession;
use crate::transcript::Turn;
use crate::{Result, ValetError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod page;

pub type SharedSession = Arc<Mutex<ChatSession>>;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub speak: bool,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Debug, Serialize)]
struct ResetResponse {
    ok: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct TurnView {
    role: &'static str,
    text: String,
}

impl From<Turn> for TurnView {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role.as_str(),
            text: turn.text,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn router(session: SharedSession) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/history", get(history))
        .route("/api/chat", post(chat))
        .route("/api/reset", post(reset))
        .route("/health", get(health))
        .with_state(session)
}

async fn index() -> Html<&'static str> {
    Html(page::CHAT_PAGE)
}

async fn health() -> &'static str {
    "ok"
}

async fn history(State(session): State<SharedSession>) -> Json<Vec<TurnView>> {
    let session = session.lock().await;
    Json(session.history().into_iter().map(TurnView::from).collect())
}

async fn chat(
    State(session): State<SharedSession>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Message must not be empty.",
        ));
    }

    let session = session.lock().await;
    match session.send(message, request.speak).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(e) => {
            warn!(error = %e, "chat turn failed");
            Err(api_error(StatusCode::BAD_GATEWAY, e.user_message()))
        }
    }
}

async fn reset(
    State(session): State<SharedSession>,
) -> std::result::Result<Json<ResetResponse>, ApiError> {
    let session = session.lock().await;
    match session.reset() {
        Ok(()) => Ok(Json(ResetResponse { ok: true })),
        Err(e) => {
            warn!(error = %e, "reset failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message()))
        }
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: &str, session: SharedSession) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ValetError::ServerError(format!("bind {addr}: {e}")))?;

    let local = listener
        .local_addr()
        .map_err(|e| ValetError::ServerError(e.to_string()))?;
    info!("valet listening on http://{local}");

    axum::serve(listener, router(session))
        .await
        .map_err(|e| ValetError::ServerError(e.to_string()))
}
