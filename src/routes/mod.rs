//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the chat, side-chat, session, and dashboard endpoints under a
//! single Axum router with CORS and request tracing. Route handlers
//! translate HTTP to service calls and own session plumbing; all
//! conversational logic lives in the service layer.

pub mod chat;
pub mod dashboard;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::pipeline::PipelineError;
use crate::state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/sidechat", post(chat::side_chat))
        .route("/api/session/{id}/clear", post(chat::clear_session))
        .route("/api/dashboard", post(dashboard::generate))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a pipeline failure to the API error body.
pub(crate) fn pipeline_to_api(e: &PipelineError) -> ApiError {
    let status = match e {
        PipelineError::RateLimitExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        PipelineError::InvalidResponseFormat(_)
        | PipelineError::SchemaValidationFailed { .. }
        | PipelineError::Llm(_) => StatusCode::BAD_GATEWAY,
    };
    ApiError::new(status, e)
}
