//! Dashboard route — report decomposition and chart planning.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::pipeline::AskOptions;
use crate::routes::pipeline_to_api;
use crate::services::dashboard::{self, DashboardSection};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DashboardBody {
    pub prompt: String,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub sections: Vec<DashboardSection>,
    /// Markdown rendering of the sections, heading/charts/divider in order.
    pub markdown: String,
}

/// `POST /api/dashboard` — decompose the prompt into report topics and
/// return per-topic tables with renderable chart instructions.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<DashboardBody>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let Some(llm) = state.llm.clone() else {
        return Err(ApiError::llm_not_configured());
    };

    let sections = dashboard::generate_dashboard(
        llm.as_ref(),
        &state.pool,
        &body.prompt,
        &AskOptions::default(),
        dashboard::topic_pause(),
    )
    .await
    .map_err(|e| pipeline_to_api(&e))?;

    let markdown = dashboard::render_dashboard_markdown(&sections);
    Ok(Json(DashboardResponse { sections, markdown }))
}
