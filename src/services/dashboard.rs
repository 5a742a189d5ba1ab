//! Home dashboard — jittered threat gauge, static stats and news feed.

use rand::Rng;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use crate::state::AppState;

pub const INITIAL_THREAT_LEVEL: u8 = 64;
pub const MIN_THREAT_LEVEL: u8 = 10;
pub const MAX_THREAT_LEVEL: u8 = 99;
pub const MAX_THREAT_STEP: i16 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NewsKind {
    Critical,
    Update,
    Security,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: &'static str,
    pub time: &'static str,
    pub kind: NewsKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    pub threat_level: u8,
    pub stats: Vec<Stat>,
    pub news: Vec<NewsItem>,
}

#[must_use]
pub fn stats() -> Vec<Stat> {
    vec![
        Stat { label: "Redes Mapeadas", value: "42.8K+" },
        Stat { label: "Ameaças Identificadas", value: "1.2M+" },
        Stat { label: "Usuários Online", value: "8.4K" },
        Stat { label: "Nodes Globais", value: "12" },
    ]
}

#[must_use]
pub fn news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            title: "Vulnerabilidade WPA3 detectada em roteadores Mesh",
            time: "2 min atrás",
            kind: NewsKind::Critical,
        },
        NewsItem { title: "Novo firmware Sagemcom corrige falha de WPS", time: "1 hora atrás", kind: NewsKind::Update },
        NewsItem {
            title: "Aumento de 15% em ataques de força bruta em SP",
            time: "3 horas atrás",
            kind: NewsKind::Security,
        },
    ]
}

#[must_use]
pub fn home(threat_level: u8) -> Home {
    Home { threat_level, stats: stats(), news: news() }
}

/// Apply one gauge step, clamped to the display range.
#[must_use]
pub fn jitter_threat(level: u8, delta: i16) -> u8 {
    let next = (i16::from(level) + delta).clamp(i16::from(MIN_THREAT_LEVEL), i16::from(MAX_THREAT_LEVEL));
    u8::try_from(next).unwrap_or(MAX_THREAT_LEVEL)
}

/// Spawn the gauge loop.
pub fn spawn_threat_task(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = state.config.threat_interval;
        info!(interval_ms = period.as_millis(), "dashboard: threat gauge started");
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            let delta = rand::rng().random_range(-MAX_THREAT_STEP..=MAX_THREAT_STEP);
            {
                let mut ws = state.workspace.write().await;
                ws.threat_level = jitter_threat(ws.threat_level, delta);
            }
            state.touch();
        }
    })
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
