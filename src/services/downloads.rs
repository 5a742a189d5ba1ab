//! Download hub — platform catalog, simulated download progress, share payload.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::simulator::{RunHandle, RunSnapshot, RunStatus, SimulatorError, SimulatorKind, Step};
use crate::i18n::{Language, translate};
use crate::state::AppState;

pub const TICK: Duration = Duration::from_millis(300);
/// Upper bound (exclusive) of the random progress gained per tick.
pub const MAX_INCREMENT: f64 = 18.0;
pub const SHARE_TITLE: &str = "WiFi WPS 5G - Security Suite";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Mac,
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Self::Windows, Self::Mac, Self::Android, Self::Ios];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl crate::error::ErrorCode for UnknownPlatform {
    fn error_code(&self) -> &'static str {
        "E_UNKNOWN_PLATFORM"
    }

    fn status(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::NOT_FOUND
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPlatform(s.to_owned()))
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadEntry {
    pub platform: Platform,
    pub name: &'static str,
    pub extension: &'static str,
    pub version: &'static str,
    pub channel: &'static str,
    pub size_mb: f32,
    /// Mobile builds are installed by scanning a QR code.
    pub has_qr: bool,
}

impl DownloadEntry {
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("WiFi_WPS_5G_{}{}", self.version, self.extension)
    }
}

#[must_use]
pub fn entry(platform: Platform) -> DownloadEntry {
    match platform {
        Platform::Windows => DownloadEntry {
            platform,
            name: "Windows",
            extension: ".exe",
            version: "v2.4.0",
            channel: "Stable",
            size_mb: 42.5,
            has_qr: false,
        },
        Platform::Mac => DownloadEntry {
            platform,
            name: "macOS",
            extension: ".dmg",
            version: "v2.4.0",
            channel: "Silicon/Intel",
            size_mb: 38.2,
            has_qr: false,
        },
        Platform::Android => DownloadEntry {
            platform,
            name: "Android",
            extension: ".apk",
            version: "v2.3.8",
            channel: "Release",
            size_mb: 24.1,
            has_qr: true,
        },
        Platform::Ios => DownloadEntry {
            platform,
            name: "iOS",
            extension: ".ipa",
            version: "v2.3.5",
            channel: "TestFlight",
            size_mb: 31.4,
            has_qr: true,
        },
    }
}

/// Every platform, in [`Platform::ALL`] order.
#[must_use]
pub fn catalog() -> Vec<DownloadEntry> {
    Platform::ALL.into_iter().map(entry).collect()
}

// =============================================================================
// SCRIPT
// =============================================================================

/// One silent step per tick with random growth, then exactly one step at 100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_script<R: Rng>(rng: &mut R, file_name: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut progress = 0.0_f64;
    loop {
        progress += rng.random_range(0.0..MAX_INCREMENT);
        if progress >= 100.0 {
            break;
        }
        // Truncation keeps 99.9 at 99 until the final step.
        steps.push(Step::silent(TICK, progress as u8));
    }
    steps.push(Step::new(format!("[DONE] {file_name} ready"), TICK, 100));
    steps
}

/// Start a simulated download of `platform` in the background.
///
/// # Errors
///
/// [`SimulatorError::Busy`] while another download is in progress.
pub fn start(state: &AppState, platform: Platform) -> Result<RunSnapshot, SimulatorError> {
    let entry = entry(platform);
    let handle = state.simulators.start(SimulatorKind::Download)?;
    let file_name = entry.file_name();
    let steps = progress_script(&mut rand::rng(), &file_name);
    state.simulators.update(&handle, |snapshot| {
        snapshot.log.push(format!("Downloading {file_name} ({} MB)", entry.size_mb));
        snapshot.outcome = serde_json::to_value(&entry).ok();
    });
    info!(%platform, steps = steps.len(), "downloads: started");

    let snapshot = state.simulators.get(SimulatorKind::Download);
    let task_state = state.clone();
    tokio::spawn(async move { run(&task_state, &handle, steps).await });
    snapshot.ok_or(SimulatorError::NotFound(SimulatorKind::Download))
}

async fn run(state: &AppState, handle: &RunHandle, steps: Vec<Step>) {
    if state.simulators.run_script(handle, steps).await {
        state.simulators.finish(handle, RunStatus::Succeeded, None);
    }
}

// =============================================================================
// SHARE
// =============================================================================

/// Payload for the browser share sheet, plus the message shown when the page
/// falls back to copying the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
    pub copied_message: String,
}

#[must_use]
pub fn share_payload(url: &str, language: Language) -> SharePayload {
    SharePayload {
        title: SHARE_TITLE.into(),
        text: translate("share.text", language).into(),
        url: url.into(),
        copied_message: translate("share.copied", language).into(),
    }
}

#[cfg(test)]
#[path = "downloads_test.rs"]
mod tests;
