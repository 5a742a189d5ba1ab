//! View router — active tab, language switch, and the render snapshot.
//!
//! DESIGN
//! ======
//! Navigation is last-write-wins. Leaving a tab cancels the simulator run it
//! owns, so a panel that is no longer shown stops logging. Switching language
//! invalidates the in-flight audit through the selection generation and
//! re-runs it in the new language.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::info;

use super::assistant::AssistantSession;
use super::audit::{self, AuditState};
use super::dashboard::{self, Home};
use super::scanner::NetworkRecord;
use super::search::SearchState;
use super::simulator::{RunSnapshot, SimulatorKind};
use crate::i18n::{Language, translate};
use crate::state::{AppState, Workspace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Scanner,
    Auditor,
    Search,
    Autoconnect,
    Extractor,
    Generator,
    Map,
    Downloads,
}

impl Tab {
    pub const ALL: [Tab; 9] = [
        Self::Dashboard,
        Self::Scanner,
        Self::Auditor,
        Self::Search,
        Self::Autoconnect,
        Self::Extractor,
        Self::Generator,
        Self::Map,
        Self::Downloads,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Scanner => "scanner",
            Self::Auditor => "auditor",
            Self::Search => "search",
            Self::Autoconnect => "autoconnect",
            Self::Extractor => "extractor",
            Self::Generator => "generator",
            Self::Map => "map",
            Self::Downloads => "downloads",
        }
    }

    /// Unknown ids land on the dashboard.
    #[must_use]
    pub fn parse_or_default(id: &str) -> Self {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(id))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Dashboard => "nav.home",
            Self::Scanner => "nav.scanner",
            Self::Auditor => "nav.auditor",
            Self::Search => "nav.search",
            Self::Autoconnect => "nav.autoconnect",
            Self::Extractor => "nav.extractor",
            Self::Generator => "nav.generator",
            Self::Map => "nav.map",
            Self::Downloads => "nav.downloads",
        }
    }

    /// Simulator whose run is bound to this tab's panel.
    #[must_use]
    pub fn owned_simulator(self) -> Option<SimulatorKind> {
        match self {
            Self::Autoconnect => Some(SimulatorKind::ZeroKey),
            Self::Extractor => Some(SimulatorKind::KeyExtraction),
            Self::Downloads => Some(SimulatorKind::Download),
            _ => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

#[must_use]
pub fn nav_entries(language: Language, active: Tab) -> Vec<NavEntry> {
    Tab::ALL
        .into_iter()
        .map(|tab| NavEntry { tab, label: translate(tab.label_key(), language), active: tab == active })
        .collect()
}

/// Set the active tab. Returns the simulator owned by the tab being left,
/// if the tab actually changed.
pub(crate) fn switch_tab(ws: &mut Workspace, tab: Tab) -> Option<SimulatorKind> {
    let leaving = std::mem::replace(&mut ws.tab, tab);
    if leaving == tab {
        return None;
    }
    leaving.owned_simulator()
}

pub async fn navigate(state: &AppState, tab: Tab) -> Tab {
    let leaving_run = switch_tab(&mut *state.workspace.write().await, tab);
    if let Some(kind) = leaving_run {
        state.simulators.cancel(kind);
    }
    state.touch();
    info!(%tab, "view: navigated");
    tab
}

/// Switch the process-wide language. A selected network is re-audited in
/// the new language; the returned handle drives that audit.
pub async fn set_language(state: &AppState, language: Language) -> Option<JoinHandle<()>> {
    let reaudit = {
        let mut ws = state.workspace.write().await;
        ws.language = language;
        ws.selection.generation += 1;
        ws.audit = AuditState::Idle;
        ws.selection.network.as_ref().map(|_| ws.selection.generation)
    };
    state.touch();
    info!(%language, "view: language changed");
    reaudit.map(|generation| audit::spawn_audit(state.clone(), generation))
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Everything the page renders, resolved for the active language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub revision: u64,
    pub tab: Tab,
    pub language: Language,
    pub nav: Vec<NavEntry>,
    pub networks: Vec<NetworkRecord>,
    pub scanning: bool,
    pub selected: Option<NetworkRecord>,
    pub audit: AuditState,
    pub search: SearchState,
    pub assistant: Option<AssistantSession>,
    pub simulators: Vec<RunSnapshot>,
    pub home: Home,
    pub ai_enabled: bool,
}

pub async fn snapshot(state: &AppState) -> DashboardSnapshot {
    // Read the revision first so a concurrent write is never reported as seen.
    let revision = state.revision.current();
    let ws = state.workspace.read().await;
    DashboardSnapshot {
        revision,
        tab: ws.tab,
        language: ws.language,
        nav: nav_entries(ws.language, ws.tab),
        networks: ws.networks.clone(),
        scanning: ws.scanning,
        selected: ws.selection.network.clone(),
        audit: ws.audit.clone(),
        search: ws.search.clone(),
        assistant: ws.assistant.clone(),
        simulators: state.simulators.all(),
        home: dashboard::home(ws.threat_level),
        ai_enabled: state.llm.is_some(),
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
