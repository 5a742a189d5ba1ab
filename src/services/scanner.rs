//! Scanner service — simulated nearby-network table.
//!
//! DESIGN
//! ======
//! The table is seeded once from a fixed list; scans never add or remove
//! records, they only jitter signal strength within [`MIN_SIGNAL_DBM`] and
//! [`MAX_SIGNAL_DBM`]. A scan opens a short "scanning" window first; while it
//! is open further scans are refused, both manual and background ones.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::state::AppState;

pub const MIN_SIGNAL_DBM: i32 = -95;
pub const MAX_SIGNAL_DBM: i32 = -30;
/// Largest per-scan signal change, in dBm, either direction.
pub const MAX_JITTER_DBM: i32 = 3;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityType {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
    Enterprise,
}

impl SecurityType {
    /// Label shown in the table and quoted in prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
            Self::Wpa2 => "WPA2-PSK",
            Self::Wpa3 => "WPA3",
            Self::Enterprise => "Enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    Ghz2_4,
    #[serde(rename = "5GHz")]
    Ghz5,
    #[serde(rename = "6GHz")]
    Ghz6,
}

impl Band {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ghz2_4 => "2.4GHz",
            Self::Ghz5 => "5GHz",
            Self::Ghz6 => "6GHz",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub id: String,
    pub ssid: String,
    pub bssid: String,
    /// dBm, always within [`MIN_SIGNAL_DBM`, `MAX_SIGNAL_DBM`].
    pub signal_strength: i32,
    pub security: SecurityType,
    pub channel: u16,
    pub frequency: Band,
    pub is_vulnerable: bool,
    pub vendor: String,
}

impl NetworkRecord {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.security == SecurityType::Open
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkFilter {
    #[default]
    All,
    Open,
    Secured,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("a scan is already in progress")]
    AlreadyScanning,
}

impl crate::error::ErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyScanning => "E_ALREADY_SCANNING",
        }
    }

    fn retryable(&self) -> bool {
        true
    }

    fn status(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::CONFLICT
    }
}

// =============================================================================
// SEED DATA
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    ssid: &str,
    bssid: &str,
    signal_strength: i32,
    security: SecurityType,
    channel: u16,
    frequency: Band,
    is_vulnerable: bool,
    vendor: &str,
) -> NetworkRecord {
    NetworkRecord {
        id: id.into(),
        ssid: ssid.into(),
        bssid: bssid.into(),
        signal_strength,
        security,
        channel,
        frequency,
        is_vulnerable,
        vendor: vendor.into(),
    }
}

/// The fixed network table, in display order.
#[must_use]
pub fn seed_networks() -> Vec<NetworkRecord> {
    use Band::{Ghz2_4, Ghz5};
    use SecurityType::{Open, Wpa2, Wpa3};
    vec![
        record("1", "TP-Link_9A42", "C0:4A:00:2B:9A:42", -45, Wpa2, 6, Ghz2_4, true, "TP-Link"),
        record("2", "Apartamento 402", "E4:5F:01:8C:44:11", -62, Wpa2, 11, Ghz2_4, false, "D-Link"),
        record("3", "Starbucks_Free_WiFi", "00:14:D1:E8:A1:02", -38, Open, 149, Ghz5, true, "Cisco"),
        record("4", "NSA_Surveillance_Van", "AA:BB:CC:DD:EE:FF", -78, Wpa3, 36, Ghz5, false, "Unknown"),
        record("5", "NetVirtua_502B", "70:54:D2:11:50:2B", -55, Wpa2, 1, Ghz2_4, true, "Sagemcom"),
        record("6", "Shopping_Center_Guest", "BC:22:99:A1:33:44", -40, Open, 11, Ghz2_4, true, "Aruba"),
        record("7", "Airport_Global_Free", "DE:AD:BE:EF:00:01", -50, Open, 44, Ghz5, true, "Ubiquiti"),
        record("8", "Biblioteca_Municipal", "11:22:33:44:55:66", -65, Open, 6, Ghz2_4, true, "TP-Link"),
    ]
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Apply a signal change, clamped to the plausible dBm range.
#[must_use]
pub fn jitter(strength: i32, delta: i32) -> i32 {
    strength.saturating_add(delta).clamp(MIN_SIGNAL_DBM, MAX_SIGNAL_DBM)
}

/// Jitter every record with independent uniform deltas.
pub fn jitter_all<R: Rng>(networks: &mut [NetworkRecord], rng: &mut R) {
    for network in networks {
        let delta = rng.random_range(-MAX_JITTER_DBM..=MAX_JITTER_DBM);
        network.signal_strength = jitter(network.signal_strength, delta);
    }
}

/// Open networks in their original relative order.
#[must_use]
pub fn open_only(networks: &[NetworkRecord]) -> Vec<NetworkRecord> {
    networks.iter().filter(|n| n.is_open()).cloned().collect()
}

/// Password-protected networks (Zero-Key targets) in their original order.
#[must_use]
pub fn secured_only(networks: &[NetworkRecord]) -> Vec<NetworkRecord> {
    networks.iter().filter(|n| !n.is_open()).cloned().collect()
}

#[must_use]
pub fn filter(networks: &[NetworkRecord], filter: NetworkFilter) -> Vec<NetworkRecord> {
    match filter {
        NetworkFilter::All => networks.to_vec(),
        NetworkFilter::Open => open_only(networks),
        NetworkFilter::Secured => secured_only(networks),
    }
}

// =============================================================================
// SCANNING
// =============================================================================

pub async fn list(state: &AppState, by: NetworkFilter) -> Vec<NetworkRecord> {
    filter(&state.workspace.read().await.networks, by)
}

/// Open a scan window.
///
/// # Errors
///
/// Returns [`ScanError::AlreadyScanning`] if a window is already open.
pub async fn open_window(state: &AppState) -> Result<(), ScanError> {
    {
        let mut ws = state.workspace.write().await;
        if ws.scanning {
            return Err(ScanError::AlreadyScanning);
        }
        ws.scanning = true;
    }
    state.touch();
    Ok(())
}

/// Wait out the scan window, jitter every record, close the window.
pub async fn complete_scan(state: &AppState) {
    tokio::time::sleep(state.config.scan_duration).await;
    {
        let mut ws = state.workspace.write().await;
        jitter_all(&mut ws.networks, &mut rand::rng());
        ws.scanning = false;
    }
    state.touch();
    debug!("scanner: scan complete");
}

/// Run one full scan.
///
/// # Errors
///
/// Returns [`ScanError::AlreadyScanning`] if a window is already open.
pub async fn rescan(state: &AppState) -> Result<(), ScanError> {
    open_window(state).await?;
    complete_scan(state).await;
    Ok(())
}

/// Spawn the background scan loop.
pub fn spawn_scan_task(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = state.config.scan_interval;
        info!(interval_ms = period.as_millis(), "scanner: background scan started");
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let Err(e) = rescan(&state).await {
                debug!(error = %e, "scanner: background scan skipped");
            }
        }
    })
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;
