//! LLM types — provider-neutral completion types and errors.
//!
//! Provider-neutral types shared by the Anthropic and OpenAI-compatible
//! clients. The [`Complete`] trait is the seam the invocation pipeline
//! depends on; tests substitute a scripted mock.

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider signalled a rate limit (HTTP 429).
    #[error("rate limited by provider")]
    RateLimited {
        /// Server-suggested wait in seconds, when the provider sent one.
        retry_after_secs: Option<u64>,
    },

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// `true` when the error is the distinguishable rate-limit condition.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::RateLimited { .. } => "E_RATE_LIMITED",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ApiRequest(_) | Self::RateLimited { .. } | Self::ApiResponse { status: 500..=599, .. }
        )
    }
}

// =============================================================================
// COMPLETION
// =============================================================================

/// A single non-streaming completion from the model service.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw text of the model reply.
    pub text: String,
    /// Model that produced the reply, as reported by the provider.
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// COMPLETE TRAIT
// =============================================================================

/// Provider-neutral async trait for single-turn completions.
///
/// One system turn, one user turn, no streaming. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Complete: Send + Sync {
    /// Send `(system, user)` to the model service and return its reply.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`]; [`LlmError::RateLimited`] is the transient
    /// condition the invocation pipeline retries on.
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<Completion, LlmError>;
}

// =============================================================================
// TEST SUPPORT
// =============================================================================


#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
