//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! whole dashboard lives in one [`Workspace`] behind a `tokio` `RwLock`;
//! simulator runs live in their own registry so synchronous step callbacks
//! never wait on the async lock. Every mutation bumps a [`Revision`] counter,
//! which the SSE stream watches to push fresh snapshots.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::config::AppConfig;
use crate::i18n::Language;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::assistant::AssistantSession;
use crate::services::audit::{AuditState, Selection};
use crate::services::dashboard::INITIAL_THREAT_LEVEL;
use crate::services::scanner::{NetworkRecord, seed_networks};
use crate::services::search::SearchState;
use crate::services::simulator::SimulatorRegistry;
use crate::services::view::Tab;

// =============================================================================
// WORKSPACE
// =============================================================================

/// Everything the dashboard renders, except simulator runs.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub tab: Tab,
    pub language: Language,
    /// Scanner table; identity is fixed, signal strength is jittered in place.
    pub networks: Vec<NetworkRecord>,
    /// True while a scan window is open.
    pub scanning: bool,
    pub selection: Selection,
    pub audit: AuditState,
    pub search: SearchState,
    pub assistant: Option<AssistantSession>,
    pub threat_level: u8,
}

impl Workspace {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            tab: Tab::default(),
            language,
            networks: seed_networks(),
            scanning: false,
            selection: Selection::default(),
            audit: AuditState::Idle,
            search: SearchState::default(),
            assistant: None,
            threat_level: INITIAL_THREAT_LEVEL,
        }
    }

    #[must_use]
    pub fn network(&self, id: &str) -> Option<&NetworkRecord> {
        self.networks.iter().find(|n| n.id == id)
    }
}

// =============================================================================
// REVISION
// =============================================================================

/// Monotonic change counter shared by every writer.
#[derive(Clone)]
pub struct Revision(Arc<watch::Sender<u64>>);

impl Revision {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(watch::Sender::new(0)))
    }

    pub fn bump(&self) {
        self.0.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        *self.0.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.0.subscribe()
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub workspace: Arc<RwLock<Workspace>>,
    pub simulators: SimulatorRegistry,
    /// Optional LLM client. `None` if the API key is not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// In-memory rate limiter for AI requests.
    pub rate_limiter: RateLimiter,
    pub revision: Revision,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, llm: Option<Arc<dyn LlmChat>>) -> Self {
        let revision = Revision::new();
        Self {
            workspace: Arc::new(RwLock::new(Workspace::new(config.default_language))),
            simulators: SimulatorRegistry::new(revision.clone()),
            llm,
            rate_limiter: RateLimiter::new(config.rate_limits),
            revision,
            config: Arc::new(config),
        }
    }

    /// Signal SSE subscribers that state changed.
    pub fn touch(&self) {
        self.revision.bump();
    }

    pub async fn language(&self) -> Language {
        self.workspace.read().await.language
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
