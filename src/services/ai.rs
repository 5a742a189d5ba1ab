//! AI service — single entry point for remote model calls.
//!
//! DESIGN
//! ======
//! Every feature goes through [`generate`], which checks the rate limiter,
//! issues exactly one request, and feeds response usage back into the token
//! budget. Features decide their own fallback text on failure.

use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::{GenerateRequest, GenerateResponse, LlmError, SchemaError};
use crate::rate_limit::{AiFeature, RateLimitError};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("LLM error: {0}")]
    LlmError(#[from] LlmError),
    #[error("rate limited: {0}")]
    RateLimited(#[from] RateLimitError),
}

impl From<SchemaError> for AiError {
    fn from(e: SchemaError) -> Self {
        Self::LlmError(LlmError::Schema(e))
    }
}

impl ErrorCode for AiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LlmNotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::LlmError(e) => e.error_code(),
            Self::RateLimited(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::LlmNotConfigured => false,
            Self::LlmError(e) => e.retryable(),
            Self::RateLimited(e) => e.retryable(),
        }
    }

    fn status(&self) -> axum::http::StatusCode {
        match self {
            Self::LlmNotConfigured => axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Self::LlmError(e) => e.status(),
            Self::RateLimited(e) => e.status(),
        }
    }
}

/// Send one request on behalf of `feature`.
///
/// # Errors
///
/// [`AiError::LlmNotConfigured`] without a client, [`AiError::RateLimited`]
/// when a limit is hit, and [`AiError::LlmError`] for provider failures.
pub async fn generate(
    state: &AppState,
    feature: AiFeature,
    request: &GenerateRequest,
) -> Result<GenerateResponse, AiError> {
    let llm = state.llm.clone().ok_or(AiError::LlmNotConfigured)?;
    state.rate_limiter.check_and_record(feature)?;

    info!(%feature, messages = request.messages.len(), grounded = request.grounding.is_some(), "ai: request");
    match llm.generate(request).await {
        Ok(response) => {
            state.rate_limiter.record_tokens(response.total_tokens());
            info!(
                %feature,
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                citations = response.citations.len(),
                "ai: response"
            );
            Ok(response)
        }
        Err(e) => {
            warn!(%feature, error = %e, "ai: request failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
