//! Chat service — natural-language question → SQL (or answer) → table.
//!
//! DESIGN
//! ======
//! The main chat turn runs two pipeline calls: first the prompt is
//! rewritten (with the session's bounded history when present), then the
//! table-Q&A agent answers with either SQL or plain text. SQL is
//! normalized and handed to the query runner; a plain-text answer short
//! circuits execution entirely. The side-chat turn answers free-form
//! questions over the current table; the caller owns the session cache
//! and stores the turn after success.

use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::llm::types::Complete;
use crate::pipeline::prompts::{self, TablePreview};
use crate::pipeline::schema::{FreeformAnswer, RewrittenPrompt, SqlOrAnswer, TypedReply};
use crate::pipeline::{AskOptions, PipelineError, ask, normalize_sql};
use crate::tables;
use crate::tabular::{SAMPLE_ROWS, TableData};

/// Reply used when side chat is asked about a table with no rows.
pub const EMPTY_TABLE_REPLY: &str = "The current table is empty. Run a query in the main chat first.";

// =============================================================================
// MAIN CHAT
// =============================================================================

/// Result of one main-chat turn: exactly one of `table` or `answer` is set.
#[derive(Debug)]
pub struct ChatOutcome {
    pub rewritten_prompt: String,
    pub sql: Option<String>,
    pub table: Option<TableData>,
    pub answer: Option<String>,
}

/// Run one main-chat turn against the described table.
///
/// # Errors
///
/// Propagates [`PipelineError`] from either pipeline call; query execution
/// itself never fails (empty table on error).
pub async fn answer_table_question(
    llm: &dyn Complete,
    pool: &PgPool,
    history: &[(String, String)],
    prompt: &str,
    opts: &AskOptions,
) -> Result<ChatOutcome, PipelineError> {
    let rewritten = rewrite(llm, history, prompt, opts).await?;
    info!(rewritten = %rewritten.optimized_prompt, "prompt rewritten");

    let table_description = tables::table_description(tables::default_profile());
    let ctx = prompts::table_qa(&rewritten.optimized_prompt, &table_description, &SqlOrAnswer::schema_text());
    let reply: SqlOrAnswer = ask(llm, &ctx, opts).await?;

    match reply.sql() {
        Some(sql) => {
            let sql = normalize_sql(sql);
            let table = db::run_query(pool, &sql).await;
            info!(rows = table.row_count(), "query executed");
            Ok(ChatOutcome {
                rewritten_prompt: rewritten.optimized_prompt,
                sql: Some(sql),
                table: Some(table),
                answer: None,
            })
        }
        None => Ok(ChatOutcome {
            rewritten_prompt: rewritten.optimized_prompt,
            sql: None,
            table: None,
            answer: Some(reply.normal_response),
        }),
    }
}

async fn rewrite(
    llm: &dyn Complete,
    history: &[(String, String)],
    prompt: &str,
    opts: &AskOptions,
) -> Result<RewrittenPrompt, PipelineError> {
    let schema = RewrittenPrompt::schema_text();
    let ctx = if history.is_empty() {
        prompts::rewrite_prompt(prompt, &schema)
    } else {
        let queries: Vec<&str> = history.iter().map(|(q, _)| q.as_str()).collect();
        let responses: Vec<&str> = history.iter().map(|(_, r)| r.as_str()).collect();
        prompts::rewrite_prompt_with_history(prompt, &queries, &responses, &schema)
    };
    ask(llm, &ctx, opts).await
}

// =============================================================================
// SIDE CHAT
// =============================================================================

/// Answer a free-form question about `table`, using the session's bounded
/// history. Returns the bot response text; the caller stores the turn into
/// its cache.
///
/// An empty table short-circuits without a model call.
///
/// # Errors
///
/// Propagates [`PipelineError`] from the pipeline call.
pub async fn side_chat(
    llm: &dyn Complete,
    table: &TableData,
    history: &[(String, String)],
    prompt: &str,
    opts: &AskOptions,
) -> Result<String, PipelineError> {
    if table.is_empty() {
        return Ok(EMPTY_TABLE_REPLY.to_string());
    }

    let sample = table.render_preview(SAMPLE_ROWS);
    let stats = table.summary_stats();
    let info = table.schema_info();
    let preview = TablePreview { sample: &sample, summary_stats: &stats, schema_info: &info };

    let schema = FreeformAnswer::schema_text();
    let ctx = if history.is_empty() {
        prompts::table_chat(prompt, preview, &schema)
    } else {
        let queries: Vec<&str> = history.iter().map(|(q, _)| q.as_str()).collect();
        let responses: Vec<&str> = history.iter().map(|(_, r)| r.as_str()).collect();
        prompts::table_chat_with_history(prompt, preview, &queries, &responses, &schema)
    };

    let reply: FreeformAnswer = ask(llm, &ctx, opts).await?;
    Ok(reply.bot_response)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
