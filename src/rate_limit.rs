//! In-memory rate limiting for remote AI calls.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `VecDeque<Instant>`. Three limits:
//! - Per feature: 10 calls/min (audit, search, assistant, ...)
//! - Global: 20 calls/min across all features
//! - Token budget: 200k tokens/hour across all features
//!
//! The budget is checked before a call and fed from response usage after it,
//! so a single large response can overshoot once; the next call is refused.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;

pub const DEFAULT_PER_FEATURE_LIMIT: usize = 10;
pub const DEFAULT_PER_FEATURE_WINDOW_SECS: u64 = 60;

pub const DEFAULT_GLOBAL_LIMIT: usize = 20;
pub const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

pub const DEFAULT_TOKEN_BUDGET: u64 = 200_000;
pub const DEFAULT_TOKEN_WINDOW_SECS: u64 = 3600;

/// Feature that issues remote AI calls; each has its own request window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiFeature {
    Audit,
    Search,
    Assistant,
    ZeroKey,
    Neighborhood,
}

impl AiFeature {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::Search => "search",
            Self::Assistant => "assistant",
            Self::ZeroKey => "zero_key",
            Self::Neighborhood => "neighborhood",
        }
    }
}

impl std::fmt::Display for AiFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_feature_limit: usize,
    pub per_feature_window: Duration,
    pub global_limit: usize,
    pub global_window: Duration,
    pub token_budget: u64,
    pub token_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_feature_limit: DEFAULT_PER_FEATURE_LIMIT,
            per_feature_window: Duration::from_secs(DEFAULT_PER_FEATURE_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
            token_budget: DEFAULT_TOKEN_BUDGET,
            token_window: Duration::from_secs(DEFAULT_TOKEN_WINDOW_SECS),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("{feature} rate limit exceeded (max {limit} requests/{window_secs}s)")]
    FeatureExceeded { feature: AiFeature, limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
    #[error("token budget exceeded (max {budget} tokens/{window_secs}s)")]
    TokenBudgetExceeded { budget: u64, window_secs: u64 },
}

impl crate::error::ErrorCode for RateLimitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FeatureExceeded { .. } => "E_RATE_LIMIT_FEATURE",
            Self::GlobalExceeded { .. } => "E_RATE_LIMIT_GLOBAL",
            Self::TokenBudgetExceeded { .. } => "E_TOKEN_BUDGET",
        }
    }

    fn retryable(&self) -> bool {
        true
    }

    fn status(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::TOO_MANY_REQUESTS
    }
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct RateLimiterInner {
    /// Per-feature request timestamps.
    feature_requests: HashMap<AiFeature, VecDeque<Instant>>,
    /// Global request timestamps.
    global_requests: VecDeque<Instant>,
    /// Token usage: (timestamp, `token_count`).
    tokens: VecDeque<(Instant, u64)>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(RateLimiterInner::default())), config }
    }

    /// Check per-feature and global limits plus the token budget, then record
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns the first limit that would be exceeded; nothing is recorded.
    pub fn check_and_record(&self, feature: AiFeature) -> Result<(), RateLimitError> {
        self.check_and_record_at(feature, Instant::now())
    }

    fn check_and_record_at(&self, feature: AiFeature, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let cfg = self.config;

        prune_token_window(&mut inner.tokens, now, cfg.token_window);
        let used: u64 = inner.tokens.iter().map(|(_, t)| t).sum();
        if used >= cfg.token_budget {
            return Err(RateLimitError::TokenBudgetExceeded {
                budget: cfg.token_budget,
                window_secs: cfg.token_window.as_secs(),
            });
        }

        prune_window(&mut inner.global_requests, now, cfg.global_window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        let feature_deque = inner.feature_requests.entry(feature).or_default();
        prune_window(feature_deque, now, cfg.per_feature_window);
        if feature_deque.len() >= cfg.per_feature_limit {
            return Err(RateLimitError::FeatureExceeded {
                feature,
                limit: cfg.per_feature_limit,
                window_secs: cfg.per_feature_window.as_secs(),
            });
        }

        feature_deque.push_back(now);
        inner.global_requests.push_back(now);
        Ok(())
    }

    /// Record token usage after a response.
    pub fn record_tokens(&self, tokens: u64) {
        self.record_tokens_at(tokens, Instant::now());
    }

    fn record_tokens_at(&self, tokens: u64, now: Instant) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        prune_token_window(&mut inner.tokens, now, self.config.token_window);
        inner.tokens.push_back((now, tokens));
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

fn prune_token_window(deque: &mut VecDeque<(Instant, u64)>, now: Instant, window: Duration) {
    while let Some(&(front, _)) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
