//! Model invocation pipeline — prompt in, validated typed reply out.
//!
//! DESIGN
//! ======
//! Every model call goes through [`ask`]: send the (system, user) pair,
//! retry on the provider's rate-limit signal up to a fixed bound, extract
//! the JSON payload from the raw reply, and validate it against one shape
//! from the schema registry. Callers receive either a validated typed
//! object or a descriptive [`PipelineError`] — never a partial object.
//!
//! The retry loop tracks success explicitly and fails closed: exhausting
//! the attempt budget without one non-rate-limited completion yields
//! `RateLimitExhausted`, and no completion is ever referenced unless an
//! attempt actually succeeded.

pub mod cache;
pub mod prompts;
pub mod schema;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ErrorCode;
use crate::llm::types::{Complete, Completion, LlmError};
use prompts::PromptContext;
use schema::TypedReply;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 30;
pub const DEFAULT_FORMAT_RETRIES: u32 = 1;

// =============================================================================
// ERROR
// =============================================================================

/// Failures of one pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Every attempt was rate-limited; the budget is spent.
    #[error("rate limit exhausted after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    /// The model returned non-JSON or unparseable JSON.
    #[error("invalid response format: {0}")]
    InvalidResponseFormat(String),

    /// Parsed JSON did not match the expected shape.
    #[error("schema validation failed for {shape}: {detail}")]
    SchemaValidationFailed { shape: &'static str, detail: String },

    /// Non-rate-limit transport failure from the model service.
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RateLimitExhausted { .. } => "E_RATE_LIMIT_EXHAUSTED",
            Self::InvalidResponseFormat(_) => "E_INVALID_RESPONSE_FORMAT",
            Self::SchemaValidationFailed { .. } => "E_SCHEMA_VALIDATION_FAILED",
            Self::Llm(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::RateLimitExhausted { .. } | Self::InvalidResponseFormat(_) => true,
            Self::SchemaValidationFailed { .. } => false,
            Self::Llm(e) => e.retryable(),
        }
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Tunables for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct AskOptions {
    /// Sampling temperature; 0.0 prefers deterministic output.
    pub temperature: f32,
    /// Total attempt budget for rate-limited calls.
    pub max_retries: u32,
    /// Fixed wait between rate-limited attempts.
    pub retry_delay: Duration,
    /// Full re-asks allowed when the reply is not parseable JSON.
    pub format_retries: u32,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            format_retries: DEFAULT_FORMAT_RETRIES,
        }
    }
}

// =============================================================================
// ASK
// =============================================================================

/// Ask the model for a reply matching shape `T`.
///
/// # Errors
///
/// [`PipelineError::RateLimitExhausted`] when every attempt hit the rate
/// limit, [`PipelineError::InvalidResponseFormat`] when the reply never
/// parsed as JSON (after `format_retries` re-asks),
/// [`PipelineError::SchemaValidationFailed`] on a shape mismatch, and
/// [`PipelineError::Llm`] for transport failures.
pub async fn ask<T: TypedReply>(
    llm: &dyn Complete,
    ctx: &PromptContext,
    opts: &AskOptions,
) -> Result<T, PipelineError> {
    let mut format_attempt = 0;
    loop {
        let completion = complete_with_retry(llm, ctx, opts).await?;
        debug!(
            shape = T::SHAPE,
            model = %completion.model,
            output_tokens = completion.output_tokens,
            "model reply received"
        );

        match extract_payload(&completion.text) {
            Ok(payload) => return validate::<T>(payload),
            Err(detail) if format_attempt < opts.format_retries => {
                format_attempt += 1;
                warn!(shape = T::SHAPE, %detail, format_attempt, "unparseable reply, re-asking");
            }
            Err(detail) => return Err(PipelineError::InvalidResponseFormat(detail)),
        }
    }
}

/// Call the model, waiting out rate limits up to the attempt budget.
///
/// Success breaks out immediately; only the rate-limit signal is retried.
async fn complete_with_retry(
    llm: &dyn Complete,
    ctx: &PromptContext,
    opts: &AskOptions,
) -> Result<Completion, PipelineError> {
    let max_attempts = opts.max_retries.max(1);
    for attempt in 1..=max_attempts {
        match llm.complete(&ctx.system, &ctx.user, opts.temperature).await {
            Ok(completion) => return Ok(completion),
            Err(LlmError::RateLimited { retry_after_secs }) => {
                if attempt == max_attempts {
                    warn!(attempt, "rate limited on final attempt");
                    return Err(PipelineError::RateLimitExhausted { attempts: max_attempts });
                }
                let delay = retry_after_secs.map_or(opts.retry_delay, Duration::from_secs);
                warn!(attempt, delay_secs = delay.as_secs(), "rate limited, waiting before retry");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
    // The loop either returns a completion or fails on the final attempt.
    Err(PipelineError::RateLimitExhausted { attempts: max_attempts })
}

// =============================================================================
// PAYLOAD EXTRACTION
// =============================================================================

/// Parse the raw reply and unwrap known model artifacts.
///
/// Certain failure paths make the model echo the JSON-schema description
/// itself (recognizable by a top-level `"properties"` key); the real
/// payload sits under it. Other replies nest the payload under a
/// top-level `"output"` object. A non-object `"output"` value is left
/// alone so the bare-SQL shape validates normally.
fn extract_payload(raw: &str) -> Result<Value, String> {
    let parsed: Value = serde_json::from_str(raw.trim()).map_err(|e| e.to_string())?;

    if let Some(inner) = parsed.get("properties") {
        return Ok(inner.clone());
    }
    if let Some(inner) = parsed.get("output") {
        if inner.is_object() {
            return Ok(inner.clone());
        }
    }
    Ok(parsed)
}

fn validate<T: TypedReply>(payload: Value) -> Result<T, PipelineError> {
    serde_json::from_value(payload)
        .map_err(|e| PipelineError::SchemaValidationFailed { shape: T::SHAPE, detail: e.to_string() })
}

// =============================================================================
// SQL NORMALIZATION
// =============================================================================

/// Flatten model-emitted SQL into a single executable line.
///
/// The model occasionally emits multi-line or backslash-escaped SQL that
/// the query runner cannot consume; collapse newlines (and surrounding
/// indentation) to single spaces and strip every backslash.
#[must_use]
pub fn normalize_sql(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\\', "")
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
