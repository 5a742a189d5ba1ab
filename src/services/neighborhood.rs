//! Local map — network markers around the user and a maps-grounded
//! recommendation of free public WiFi nearby.
//!
//! DESIGN
//! ======
//! Marker placement is deterministic: each network is offset from the user's
//! position by a small angle derived from its numeric id, so markers do not
//! jump between renders. The page only draws what [`map_view`] returns.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ai;
use super::scanner::NetworkRecord;
use crate::i18n::{Language, translate};
use crate::llm::{Citation, GenerateRequest, Grounding};
use crate::rate_limit::AiFeature;
use crate::state::AppState;

/// São Paulo city center, used when the browser gives no usable position.
pub const FALLBACK_LOCATION: Coordinates = Coordinates { latitude: -23.5505, longitude: -46.6333 };
pub const SEED_FACTOR: f64 = 123.456;
pub const OFFSET_SCALE: f64 = 0.005;

pub const COLOR_OPEN: &str = "#06b6d4";
pub const COLOR_VULNERABLE: &str = "#ef4444";
pub const COLOR_SECURE: &str = "#22c55e";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Browser-supplied position, or [`FALLBACK_LOCATION`] when absent or out
/// of range.
#[must_use]
pub fn resolve_location(supplied: Option<Coordinates>) -> Coordinates {
    supplied
        .filter(|c| c.is_valid())
        .unwrap_or(FALLBACK_LOCATION)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub network_id: String,
    pub ssid: String,
    pub position: Coordinates,
    pub color: &'static str,
    pub stroke: &'static str,
    /// Coverage circle radius in meters.
    pub coverage_radius: f64,
    pub marker_radius: u8,
    pub requires_password: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: Coordinates,
    pub tile_url: String,
    pub markers: Vec<Marker>,
}

#[must_use]
pub fn marker(network: &NetworkRecord, center: Coordinates) -> Marker {
    // Non-numeric ids use a zero seed.
    let seed = network.id.parse::<f64>().unwrap_or(0.0) * SEED_FACTOR;
    let open = network.is_open();
    let color = if open {
        COLOR_OPEN
    } else if network.is_vulnerable {
        COLOR_VULNERABLE
    } else {
        COLOR_SECURE
    };
    Marker {
        network_id: network.id.clone(),
        ssid: network.ssid.clone(),
        position: Coordinates {
            latitude: center.latitude + seed.sin() * OFFSET_SCALE,
            longitude: center.longitude + seed.cos() * OFFSET_SCALE,
        },
        color,
        stroke: if open { "#fff" } else { "#000" },
        coverage_radius: 40.0 + f64::from(network.signal_strength.unsigned_abs()) / 2.0,
        marker_radius: if open { 8 } else { 5 },
        requires_password: !open,
    }
}

#[must_use]
pub fn markers(networks: &[NetworkRecord], center: Coordinates, open_only: bool) -> Vec<Marker> {
    networks
        .iter()
        .filter(|n| !open_only || n.is_open())
        .map(|n| marker(n, center))
        .collect()
}

pub async fn map_view(state: &AppState, supplied: Option<Coordinates>, open_only: bool) -> MapView {
    let center = resolve_location(supplied);
    let ws = state.workspace.read().await;
    MapView { center, tile_url: state.config.map_tile_url.clone(), markers: markers(&ws.networks, center, open_only) }
}

// =============================================================================
// ANALYSIS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub text: String,
    pub sources: Vec<Citation>,
    /// True when the text is the localized fallback.
    pub fallback: bool,
}

#[must_use]
pub fn build_prompt(language: Language) -> String {
    format!(
        "What are the best free public (open) WiFi options in this area? \
         Identify establishments known for offering a stable connection. \
         Answer in the language: {}.",
        language.label()
    )
}

/// Ask the maps-grounded model for nearby free WiFi. Never fails: any error
/// becomes the localized fallback text.
pub async fn analyze(state: &AppState, supplied: Option<Coordinates>) -> Analysis {
    let at = resolve_location(supplied);
    let language = state.language().await;
    let request = GenerateRequest {
        grounding: Some(Grounding::Maps { latitude: at.latitude, longitude: at.longitude }),
        ..GenerateRequest::prompt(build_prompt(language))
    };
    match ai::generate(state, AiFeature::Neighborhood, &request).await {
        Ok(response) if !response.text.trim().is_empty() => {
            Analysis { text: response.text, sources: response.citations, fallback: false }
        }
        Ok(_) => fallback(language),
        Err(e) => {
            warn!(error = %e, "neighborhood: analysis failed");
            fallback(language)
        }
    }
}

fn fallback(language: Language) -> Analysis {
    Analysis { text: translate("map.analysis_error", language).to_string(), sources: Vec::new(), fallback: true }
}

#[cfg(test)]
#[path = "neighborhood_test.rs"]
mod tests;
