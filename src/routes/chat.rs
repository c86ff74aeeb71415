//! Chat routes — main chat, side chat, and session lifecycle.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::pipeline::AskOptions;
use crate::routes::pipeline_to_api;
use crate::services;
use crate::state::{AppState, ChatSession};
use crate::tabular::TableData;

// =============================================================================
// MAIN CHAT
// =============================================================================

#[derive(Deserialize)]
pub struct ChatBody {
    /// Omit to start a new session.
    pub session_id: Option<Uuid>,
    pub prompt: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub rewritten_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// `POST /api/chat` — one main-chat turn: rewrite, derive SQL or answer,
/// execute, remember the loaded table for side chat.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Some(llm) = state.llm.clone() else {
        return Err(ApiError::llm_not_configured());
    };
    let session_id = body.session_id.unwrap_or_else(Uuid::new_v4);

    // Snapshot history so the lock is not held across model calls.
    let history = {
        let sessions = state.sessions.read().await;
        sessions
            .get(&session_id)
            .map(|s| s.cache.entries().to_vec())
            .unwrap_or_default()
    };

    let outcome =
        services::chat::answer_table_question(llm.as_ref(), &state.pool, &history, &body.prompt, &AskOptions::default())
            .await
            .map_err(|e| pipeline_to_api(&e))?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.entry(session_id).or_insert_with(ChatSession::new);
    if let Some(table) = &outcome.table {
        session.current_table = Some(table.clone());
    }

    Ok(Json(ChatResponse {
        session_id,
        rewritten_prompt: outcome.rewritten_prompt,
        sql: outcome.sql,
        table: outcome.table,
        answer: outcome.answer,
    }))
}

// =============================================================================
// SIDE CHAT
// =============================================================================

#[derive(Deserialize)]
pub struct SideChatBody {
    pub session_id: Uuid,
    pub prompt: String,
}

#[derive(Serialize)]
pub struct SideChatResponse {
    pub response: String,
}

/// `POST /api/sidechat` — free-form question over the session's current
/// table; stores the turn into the session's bounded history.
pub async fn side_chat(
    State(state): State<AppState>,
    Json(body): Json<SideChatBody>,
) -> Result<Json<SideChatResponse>, ApiError> {
    let Some(llm) = state.llm.clone() else {
        return Err(ApiError::llm_not_configured());
    };

    let (table, history) = {
        let sessions = state.sessions.read().await;
        let Some(session) = sessions.get(&body.session_id) else {
            return Err(ApiError::session_not_found(body.session_id));
        };
        (
            session.current_table.clone().unwrap_or_else(TableData::empty),
            session.cache.entries().to_vec(),
        )
    };

    let response =
        services::chat::side_chat(llm.as_ref(), &table, &history, &body.prompt, &AskOptions::default())
            .await
            .map_err(|e| pipeline_to_api(&e))?;

    let mut sessions = state.sessions.write().await;
    if let Some(session) = sessions.get_mut(&body.session_id) {
        session.cache.store(body.prompt, response.clone());
    }

    Ok(Json(SideChatResponse { response }))
}

// =============================================================================
// SESSION LIFECYCLE
// =============================================================================

/// `POST /api/session/:id/clear` — drop the session's history and current
/// table. Idempotent; clearing an unknown session is a no-op.
pub async fn clear_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<serde_json::Value> {
    let mut sessions = state.sessions.write().await;
    if let Some(session) = sessions.get_mut(&id) {
        session.cache.clear();
        session.current_table = None;
    }
    Json(serde_json::json!({ "cleared": id }))
}
