//! LLM — multi-provider completion client for the invocation pipeline.
//!
//! DESIGN
//! ======
//! The `LlmClient` enum dispatches to Anthropic or an OpenAI-compatible
//! endpoint based on `LLM_PROVIDER`, configured from environment variables.
//! Both providers are driven through the same `(system, user, temperature)`
//! single-turn contract; the pipeline depends only on the [`Complete`]
//! trait so tests can substitute a scripted mock.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{Complete, Completion};
use types::LlmError;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Anthropic or an
/// OpenAI-compatible endpoint.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    max_tokens: u32,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let max_tokens = config.max_tokens;
        let inner = match config.provider {
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model, max_tokens })
    }

    /// Return the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl Complete for LlmClient {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<Completion, LlmError> {
        match &self.inner {
            LlmProvider::Anthropic(c) => {
                c.complete(&self.model, self.max_tokens, system, user, temperature)
                    .await
            }
            LlmProvider::OpenAi(c) => {
                c.complete(&self.model, self.max_tokens, system, user, temperature)
                    .await
            }
        }
    }
}
