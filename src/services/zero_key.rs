//! Zero-Key service — simulated password-less connection walkthrough.
//!
//! DESIGN
//! ======
//! Five scripted stages fill the terminal log, then one schema-constrained
//! model call produces the verdict. Any failure on the model side swaps in
//! a fixed failure line and fallback verdict; the run never stalls.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ai::{self, AiError};
use super::simulator::{RunHandle, RunSnapshot, RunStatus, SimulatorError, SimulatorKind, Step};
use crate::error::ErrorCode;
use crate::i18n::{Language, translate};
use crate::llm::{GenerateRequest, Schema};
use crate::rate_limit::AiFeature;
use crate::services::scanner::NetworkRecord;
use crate::state::AppState;

pub const SUCCESS_LINE: &str = "[SUCCESS] Ephemeral key injected into the network adapter.";
pub const FAILURE_LINE: &str = "[ERROR] Real-time decryption failed.";

/// Verdict returned by the model, or the fallback on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub success: bool,
    pub method: String,
    pub explanation: String,
}

impl Verdict {
    #[must_use]
    pub fn fallback(language: Language) -> Self {
        Self {
            success: false,
            method: "N/A".into(),
            explanation: translate("zerokey.failure", language).to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ZeroKeyError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
    #[error("{0} is an open network; Zero-Key needs a protected target")]
    UnsupportedTarget(String),
    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}

impl ErrorCode for ZeroKeyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNetwork(_) => "E_UNKNOWN_NETWORK",
            Self::UnsupportedTarget(_) => "E_UNSUPPORTED_TARGET",
            Self::Simulator(e) => e.error_code(),
        }
    }

    fn status(&self) -> axum::http::StatusCode {
        match self {
            Self::UnknownNetwork(_) => axum::http::StatusCode::NOT_FOUND,
            Self::UnsupportedTarget(_) => axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            Self::Simulator(e) => e.status(),
        }
    }
}

// =============================================================================
// SCRIPT
// =============================================================================

#[must_use]
pub fn opening_line() -> String {
    "[SYSTEM] Starting Zero-Key Protocol v4.0...".to_string()
}

#[must_use]
pub fn stages() -> Vec<Step> {
    vec![
        Step::new("[SCAN] Capturing target beacon frames...", Duration::from_millis(1000), 20),
        Step::new("[INJECT] Injecting packets to force a handshake...", Duration::from_millis(1500), 40),
        Step::new("[AI] Analyzing the vendor's encryption pattern...", Duration::from_millis(1200), 60),
        Step::new("[EXPLOIT] Testing known vulnerabilities (WPS Pixie-Dust/Reaver)...", Duration::from_millis(2000), 85),
        Step::new("[CLOUD] Querying rainbow tables via the Gemini cloud engine...", Duration::from_millis(1500), 95),
    ]
}

#[must_use]
pub fn verdict_schema() -> Schema {
    Schema::object(vec![
        ("success", Schema::boolean()),
        ("method", Schema::string().describe("Name of the technique used")),
        ("explanation", Schema::string().describe("Technical explanation of the weakness")),
    ])
}

#[must_use]
pub fn build_prompt(network: &NetworkRecord, language: Language) -> String {
    format!(
        "Simulate a technical vulnerability analysis for the network {ssid} ({vendor}).\n\
         Explain how a \"Zero-Key Connection\" (connecting without typing a password) would work for this \
         specific network (e.g. via a WPS weakness, a default PIN, or a captured 4-way handshake).\n\
         Be technical but keep the tone of an educational audit.\n\
         Write every answer in the language: {label}.",
        ssid = network.ssid,
        vendor = network.vendor,
        label = language.label(),
    )
}

// =============================================================================
// RUN
// =============================================================================

/// Validate the target and start a run in the background.
///
/// # Errors
///
/// Unknown or open targets, or [`SimulatorError::Busy`] while a run is live.
pub async fn start(state: &AppState, network_id: &str) -> Result<RunSnapshot, ZeroKeyError> {
    let (network, language) = {
        let ws = state.workspace.read().await;
        let network = ws
            .network(network_id)
            .cloned()
            .ok_or_else(|| ZeroKeyError::UnknownNetwork(network_id.to_owned()))?;
        (network, ws.language)
    };
    if network.is_open() {
        return Err(ZeroKeyError::UnsupportedTarget(network.ssid));
    }

    let handle = state.simulators.start(SimulatorKind::ZeroKey)?;
    state
        .simulators
        .update(&handle, |snapshot| snapshot.log.push(opening_line()));
    info!(network = %network.id, ssid = %network.ssid, "zero_key: started");

    let snapshot = state.simulators.get(SimulatorKind::ZeroKey);
    let task_state = state.clone();
    tokio::spawn(async move { run(&task_state, &handle, &network, language).await });
    snapshot.ok_or(ZeroKeyError::Simulator(SimulatorError::NotFound(SimulatorKind::ZeroKey)))
}

async fn run(state: &AppState, handle: &RunHandle, network: &NetworkRecord, language: Language) {
    if !state.simulators.run_script(handle, stages()).await {
        return;
    }

    let verdict = request_verdict(state, network, language).await;
    if handle.cancel.is_cancelled() {
        return;
    }
    match verdict {
        Ok(verdict) => {
            state.simulators.update(handle, |snapshot| {
                snapshot.log.push(SUCCESS_LINE.into());
                snapshot.progress = 100;
            });
            state
                .simulators
                .finish(handle, RunStatus::Succeeded, serde_json::to_value(&verdict).ok());
        }
        Err(e) => {
            warn!(network = %network.id, error = %e, "zero_key: verdict failed");
            state
                .simulators
                .update(handle, |snapshot| snapshot.log.push(FAILURE_LINE.into()));
            let fallback = Verdict::fallback(language);
            state
                .simulators
                .finish(handle, RunStatus::Failed, serde_json::to_value(&fallback).ok());
        }
    }
}

async fn request_verdict(state: &AppState, network: &NetworkRecord, language: Language) -> Result<Verdict, AiError> {
    let schema = verdict_schema();
    let request = GenerateRequest {
        response_schema: Some(schema.clone()),
        ..GenerateRequest::prompt(build_prompt(network, language))
    };
    let response = ai::generate(state, AiFeature::ZeroKey, &request).await?;
    Ok(schema.decode(&response.text)?)
}

#[cfg(test)]
#[path = "zero_key_test.rs"]
mod tests;
