//! LLM — Gemini adapter for the AI-backed features.
//!
//! DESIGN
//! ======
//! Services depend on the [`LlmChat`] trait only. [`LlmClient`] is the
//! production implementation: it owns a [`gemini::GeminiClient`] and picks the
//! model per request (maps grounding goes to the maps-capable model).
//! Structured output is declared with [`schema::Schema`] and validated before
//! it reaches a service.

pub mod config;
pub mod gemini;
pub mod schema;
pub mod types;

use config::LlmConfig;
pub use schema::{Schema, SchemaError};
pub use types::{Citation, GenerateRequest, GenerateResponse, Grounding, LlmChat, LlmError, Message, Role};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client backed by the Gemini REST API.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
    maps_model: String,
    max_output_tokens: u32,
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
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self {
            inner,
            model: config.model,
            maps_model: config.maps_model,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Return the default model name (e.g. `"gemini-3-flash-preview"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model that serves `request`.
    #[must_use]
    pub fn model_for(&self, request: &GenerateRequest) -> &str {
        match request.grounding {
            Some(Grounding::Maps { .. }) => &self.maps_model,
            _ => &self.model,
        }
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let model = self.model_for(request);
        tracing::debug!(%model, messages = request.messages.len(), "llm: generate");
        self.inner
            .generate(model, self.max_output_tokens, request)
            .await
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
