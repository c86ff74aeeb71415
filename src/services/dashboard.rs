//! Dashboard service — request → report topics → SQL per topic → charts.
//!
//! DESIGN
//! ======
//! Decomposes a user request into 1–3 report topics, then processes the
//! topics strictly one at a time with a fixed inter-call pause to respect
//! provider rate limits. Per topic: derive SQL from the description,
//! execute it, and (for non-empty tables) plan charts over the result.
//! Topic-level format/validation failures skip that topic; rate-limit
//! exhaustion and transport failures abort the whole run.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::charts;
use crate::db;
use crate::llm::types::Complete;
use crate::pipeline::prompts;
use crate::pipeline::schema::{ChartPlan, ChartStep, ReportPlan, SqlOutput, TypedReply};
use crate::pipeline::{AskOptions, PipelineError, ask, normalize_sql};
use crate::tables;
use crate::tabular::TableData;

/// Upper bound on report topics per dashboard.
pub const MAX_REPORT_TOPICS: usize = 3;

/// Rows of each topic table shown to the chart planner.
const CHART_SAMPLE_ROWS: usize = 3;

const DEFAULT_TOPIC_PAUSE_SECS: u64 = 5;

/// Fixed pause between per-topic model calls, from
/// `DASHBOARD_TOPIC_PAUSE_SECS` (default 5).
#[must_use]
pub fn topic_pause() -> Duration {
    static VALUE: OnceLock<u64> = OnceLock::new();
    let secs = *VALUE.get_or_init(|| {
        std::env::var("DASHBOARD_TOPIC_PAUSE_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOPIC_PAUSE_SECS)
    });
    Duration::from_secs(secs)
}

// =============================================================================
// TYPES
// =============================================================================

/// One assembled dashboard section: a report topic with its data and the
/// renderable chart instructions for it.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSection {
    pub topic: String,
    pub description: String,
    pub sql: String,
    pub table: TableData,
    pub charts: Vec<ChartStep>,
}

// =============================================================================
// GENERATION
// =============================================================================

/// Build dashboard sections for `prompt`.
///
/// # Errors
///
/// Propagates [`PipelineError`] from the report decomposition, and from
/// per-topic calls when the failure is not recoverable (rate-limit
/// exhaustion, transport). Recoverable per-topic failures skip the topic.
pub async fn generate_dashboard(
    llm: &dyn Complete,
    pool: &PgPool,
    prompt: &str,
    opts: &AskOptions,
    pause: Duration,
) -> Result<Vec<DashboardSection>, PipelineError> {
    let table_description = tables::table_description(tables::default_profile());

    let ctx = prompts::report_plan(prompt, &table_description, &ReportPlan::schema_text());
    let plan: ReportPlan = ask(llm, &ctx, opts).await?;

    if usize::try_from(plan.num_reports).ok() != Some(plan.reports.len()) {
        warn!(num_reports = plan.num_reports, topics = plan.reports.len(), "report count mismatch");
    }
    if plan.reports.len() > MAX_REPORT_TOPICS {
        warn!(topics = plan.reports.len(), "report plan over budget, truncating");
    }

    let mut sections = Vec::new();
    for (idx, topic) in plan.reports.iter().take(MAX_REPORT_TOPICS).enumerate() {
        if idx > 0 {
            tokio::time::sleep(pause).await;
        }
        info!(topic = %topic.report_name, "processing report topic");

        let sql = match topic_sql(llm, prompt, &topic.report_name, &topic.description, &table_description, opts).await
        {
            Ok(sql) => sql,
            Err(e) if recoverable(&e) => {
                warn!(topic = %topic.report_name, error = %e, "SQL generation failed, skipping topic");
                continue;
            }
            Err(e) => return Err(e),
        };

        let table = db::run_query(pool, &sql).await;
        if table.is_empty() {
            warn!(topic = %topic.report_name, "no data for topic, skipping");
            continue;
        }

        let steps = match topic_charts(llm, prompt, &table, opts).await {
            Ok(plan) => charts::filter_plan(plan),
            Err(e) if recoverable(&e) => {
                warn!(topic = %topic.report_name, error = %e, "chart planning failed, section has no charts");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        sections.push(DashboardSection {
            topic: topic.report_name.clone(),
            description: topic.description.clone(),
            sql,
            table,
            charts: steps,
        });
    }

    Ok(sections)
}

async fn topic_sql(
    llm: &dyn Complete,
    prompt: &str,
    report_statement: &str,
    report_description: &str,
    table_description: &str,
    opts: &AskOptions,
) -> Result<String, PipelineError> {
    let ctx = prompts::sql_from_description(
        prompt,
        report_statement,
        report_description,
        table_description,
        &SqlOutput::schema_text(),
    );
    let reply: SqlOutput = ask(llm, &ctx, opts).await?;
    Ok(normalize_sql(&reply.output))
}

async fn topic_charts(
    llm: &dyn Complete,
    prompt: &str,
    table: &TableData,
    opts: &AskOptions,
) -> Result<ChartPlan, PipelineError> {
    let sample = table.sample(CHART_SAMPLE_ROWS).render_preview(CHART_SAMPLE_ROWS);
    let stats = table.summary_stats();
    let names = charts::chart_type_names().join(", ");
    let ctx = prompts::chart_plan(
        prompt,
        &sample,
        &stats,
        &names,
        &charts::capability_table_text(),
        &ChartPlan::schema_text(),
    );
    ask(llm, &ctx, opts).await
}

fn recoverable(e: &PipelineError) -> bool {
    matches!(
        e,
        PipelineError::InvalidResponseFormat(_) | PipelineError::SchemaValidationFailed { .. }
    )
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render sections as a markdown document.
///
/// Sequencing is explicit at this call site: heading, then each chart
/// block, then a divider — no wrapping or interception anywhere else.
#[must_use]
pub fn render_dashboard_markdown(sections: &[DashboardSection]) -> String {
    let mut out = String::from("### Generated Dashboard\n\n");
    for section in sections {
        out.push_str(&format!("#### {}\n\n{}\n\n", section.topic, section.description));
        for step in &section.charts {
            let columns: Vec<String> = step
                .chart_columns
                .iter()
                .map(|(role, col)| format!("{role}={col}"))
                .collect();
            out.push_str(&format!(
                "- **{}** ({}; {}): {}\n",
                step.chart_title,
                step.chart_type,
                columns.join(", "),
                step.chart_description
            ));
        }
        out.push_str("\n---\n\n");
    }
    out
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
