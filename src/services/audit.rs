//! Audit service — schema-constrained security report for one network.
//!
//! DESIGN
//! ======
//! Exactly one network is selected at a time. Every selection (and every
//! language switch) bumps the selection generation and clears the displayed
//! report. An audit remembers the generation it was started for; when its
//! response arrives under a newer generation it is dropped as
//! [`AuditError::Superseded`] without touching state. The model must return
//! all five report fields with their declared types, and a score inside
//! 0..=100, or the audit fails as a whole.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::ai::{self, AiError};
use super::scanner::NetworkRecord;
use super::view::{self, Tab};
use crate::error::ErrorCode;
use crate::i18n::{Language, translate};
use crate::llm::{GenerateRequest, Schema, SchemaError};
use crate::rate_limit::AiFeature;
use crate::state::AppState;

pub const MAX_SCORE: u8 = 100;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub score: u8,
    pub vulnerabilities: Vec<String>,
    pub recommendations: Vec<String>,
    pub estimated_cracking_time: String,
    pub likely_default_passwords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuditState {
    Idle,
    Loading { generation: u64 },
    Ready { generation: u64, report: SecurityReport },
    Failed { generation: u64, message: String },
}

/// The selected network and the generation counter guarding its audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub network: Option<NetworkRecord>,
    pub generation: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
    #[error("no network selected")]
    NoSelection,
    #[error("audit for generation {0} was superseded")]
    Superseded(u64),
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl From<SchemaError> for AuditError {
    fn from(e: SchemaError) -> Self {
        Self::Ai(e.into())
    }
}

impl ErrorCode for AuditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNetwork(_) => "E_UNKNOWN_NETWORK",
            Self::NoSelection => "E_NO_SELECTION",
            Self::Superseded(_) => "E_SUPERSEDED",
            Self::Ai(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Ai(e) => e.retryable(),
            _ => false,
        }
    }

    fn status(&self) -> axum::http::StatusCode {
        match self {
            Self::UnknownNetwork(_) => axum::http::StatusCode::NOT_FOUND,
            Self::NoSelection | Self::Superseded(_) => axum::http::StatusCode::CONFLICT,
            Self::Ai(e) => e.status(),
        }
    }
}

// =============================================================================
// PROMPT / SCHEMA
// =============================================================================

#[must_use]
pub fn report_schema() -> Schema {
    let list = || Schema::array_of(Schema::string());
    Schema::object(vec![
        ("score", Schema::integer().describe("0 to 100 security score")),
        ("vulnerabilities", list().describe("List of technical flaws")),
        ("recommendations", list().describe("How to protect the network")),
        ("estimatedCrackingTime", Schema::string().describe("Estimated brute-force time")),
        ("likelyDefaultPasswords", list().describe("Common default passwords for this vendor")),
    ])
}

#[must_use]
pub fn build_prompt(network: &NetworkRecord, language: Language) -> String {
    format!(
        "Perform an educational security audit of the following WiFi network.\n\
         SSID: {ssid}\n\
         BSSID: {bssid}\n\
         Security: {security}\n\
         Vendor: {vendor}\n\
         Channel: {channel} ({band})\n\
         Identify known vulnerabilities for this vendor and model, such as a default WPS pin or \
         predictable factory passwords.\n\
         Every answer must be written in the language: {label}.",
        ssid = network.ssid,
        bssid = network.bssid,
        security = network.security.label(),
        vendor = network.vendor,
        channel = network.channel,
        band = network.frequency.label(),
        label = language.label(),
    )
}

/// Validate and decode a model answer into a report.
///
/// # Errors
///
/// Any shape mismatch, and a score outside 0..=100.
pub fn parse_report(text: &str) -> Result<SecurityReport, SchemaError> {
    let mut value: Value = serde_json::from_str(text.trim()).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    report_schema().validate(&value)?;
    let score = value["score"].as_f64().unwrap_or(f64::NAN);
    if !(0.0..=f64::from(MAX_SCORE)).contains(&score) {
        return Err(SchemaError::OutOfRange { path: "$.score".into(), detail: format!("{score} not in 0..=100") });
    }
    // Integer-valued floats such as `72.0` pass validation; store the plain integer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = score.round() as u8;
    value["score"] = Value::from(score);
    serde_json::from_value(value).map_err(|e| SchemaError::Decode(e.to_string()))
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Select `network_id`, clear the report, and switch to the auditor tab.
/// Returns the new generation.
///
/// # Errors
///
/// [`AuditError::UnknownNetwork`] for an id that is not in the table.
pub async fn select_network(state: &AppState, network_id: &str) -> Result<u64, AuditError> {
    let (generation, leaving_run) = {
        let mut ws = state.workspace.write().await;
        let network = ws
            .network(network_id)
            .cloned()
            .ok_or_else(|| AuditError::UnknownNetwork(network_id.to_owned()))?;
        ws.selection.generation += 1;
        ws.selection.network = Some(network);
        ws.audit = AuditState::Idle;
        let leaving_run = view::switch_tab(&mut ws, Tab::Auditor);
        (ws.selection.generation, leaving_run)
    };
    if let Some(kind) = leaving_run {
        state.simulators.cancel(kind);
    }
    state.touch();
    info!(network = %network_id, generation, "audit: network selected");
    Ok(generation)
}

/// Audit the current selection.
///
/// # Errors
///
/// [`AuditError::NoSelection`], [`AuditError::Superseded`] when the
/// selection changed while waiting, or the remote failure (which is also
/// recorded as `Failed` state).
pub async fn run_audit(state: &AppState) -> Result<SecurityReport, AuditError> {
    audit(state, None).await
}

/// Run the audit for `generation` in the background.
pub fn spawn_audit(state: AppState, generation: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = audit(&state, Some(generation)).await {
            info!(generation, error = %e, "audit: background audit ended without a report");
        }
    })
}

async fn audit(state: &AppState, expected: Option<u64>) -> Result<SecurityReport, AuditError> {
    let (network, generation, language) = {
        let mut ws = state.workspace.write().await;
        let generation = ws.selection.generation;
        if expected.is_some_and(|g| g != generation) {
            return Err(AuditError::Superseded(generation));
        }
        let network = ws.selection.network.clone().ok_or(AuditError::NoSelection)?;
        ws.audit = AuditState::Loading { generation };
        (network, generation, ws.language)
    };
    state.touch();
    info!(network = %network.id, generation, "audit: requested");

    let outcome = request_report(state, &network, language).await;

    let mut ws = state.workspace.write().await;
    if ws.selection.generation != generation {
        info!(network = %network.id, generation, current = ws.selection.generation, "audit: stale response dropped");
        return Err(AuditError::Superseded(generation));
    }
    let result = match outcome {
        Ok(report) => {
            info!(network = %network.id, generation, score = report.score, "audit: ready");
            ws.audit = AuditState::Ready { generation, report: report.clone() };
            Ok(report)
        }
        Err(e) => {
            warn!(network = %network.id, generation, error = %e, "audit: failed");
            ws.audit = AuditState::Failed { generation, message: translate("audit.error", language).to_string() };
            Err(e)
        }
    };
    drop(ws);
    state.touch();
    result
}

async fn request_report(
    state: &AppState,
    network: &NetworkRecord,
    language: Language,
) -> Result<SecurityReport, AuditError> {
    let request = GenerateRequest {
        response_schema: Some(report_schema()),
        ..GenerateRequest::prompt(build_prompt(network, language))
    };
    let response = ai::generate(state, AiFeature::Audit, &request).await?;
    Ok(parse_report(&response.text)?)
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
