//! Simulator engine — cancellable replay of scripted progress steps.
//!
//! DESIGN
//! ======
//! A simulated workflow is a list of [`Step`]s replayed with real delays.
//! Each run gets a `CancellationToken`; [`replay`] races every delay against
//! it with a biased `select!`, so once cancellation is observed no further
//! step is reported. The [`SimulatorRegistry`] keeps the latest run per
//! [`SimulatorKind`] and drops updates addressed to a run that was cancelled
//! or replaced, keyed by run id.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::state::Revision;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulatorKind {
    ZeroKey,
    Download,
    KeyExtraction,
}

impl SimulatorKind {
    pub const ALL: [SimulatorKind; 3] = [Self::ZeroKey, Self::Download, Self::KeyExtraction];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZeroKey => "zero-key",
            Self::Download => "download",
            Self::KeyExtraction => "key-extraction",
        }
    }
}

impl fmt::Display for SimulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulatorKind {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SimulatorError::UnknownKind(s.to_owned()))
    }
}

/// One scripted step: wait `delay`, then log `message` (if any) and report
/// `progress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub message: Option<String>,
    pub delay: Duration,
    pub progress: u8,
}

impl Step {
    #[must_use]
    pub fn new(message: impl Into<String>, delay: Duration, progress: u8) -> Self {
        Self { message: Some(message.into()), delay, progress }
    }

    #[must_use]
    pub fn silent(delay: Duration, progress: u8) -> Self {
        Self { message: None, delay, progress }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub id: Uuid,
    pub kind: SimulatorKind,
    pub status: RunStatus,
    pub progress: u8,
    pub log: Vec<String>,
    pub outcome: Option<serde_json::Value>,
}

impl RunSnapshot {
    fn apply(&mut self, step: &Step) {
        if let Some(message) = &step.message {
            self.log.push(message.clone());
        }
        self.progress = step.progress.min(100);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("{0} is already running")]
    Busy(SimulatorKind),
    #[error("no {0} run has been started")]
    NotFound(SimulatorKind),
    #[error("unknown simulator: {0}")]
    UnknownKind(String),
}

impl crate::error::ErrorCode for SimulatorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy(_) => "E_SIMULATOR_BUSY",
            Self::NotFound(_) => "E_RUN_NOT_FOUND",
            Self::UnknownKind(_) => "E_UNKNOWN_SIMULATOR",
        }
    }

    fn status(&self) -> axum::http::StatusCode {
        match self {
            Self::Busy(_) => axum::http::StatusCode::CONFLICT,
            Self::NotFound(_) | Self::UnknownKind(_) => axum::http::StatusCode::NOT_FOUND,
        }
    }
}

// =============================================================================
// REPLAY
// =============================================================================

/// Replay `steps` in order, calling `on_step` after each delay.
///
/// Returns `true` when every step was reported, `false` when cancelled.
pub async fn replay<I, F>(steps: I, cancel: &CancellationToken, mut on_step: F) -> bool
where
    I: IntoIterator<Item = Step>,
    F: FnMut(&Step),
{
    for step in steps {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return false,
            () = tokio::time::sleep(step.delay) => {}
        }
        on_step(&step);
    }
    !cancel.is_cancelled()
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Handle given to the task driving one run.
#[derive(Debug, Clone)]
pub struct RunHandle {
    pub id: Uuid,
    pub kind: SimulatorKind,
    pub cancel: CancellationToken,
}

struct RunEntry {
    snapshot: RunSnapshot,
    cancel: CancellationToken,
}

#[derive(Clone)]
pub struct SimulatorRegistry {
    runs: Arc<Mutex<HashMap<SimulatorKind, RunEntry>>>,
    revision: Revision,
}

impl SimulatorRegistry {
    #[must_use]
    pub fn new(revision: Revision) -> Self {
        Self { runs: Arc::new(Mutex::new(HashMap::new())), revision }
    }

    /// Register a new run of `kind`, replacing a finished one.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::Busy`] while a run of `kind` is in progress.
    pub fn start(&self, kind: SimulatorKind) -> Result<RunHandle, SimulatorError> {
        let handle = {
            let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
            if runs
                .get(&kind)
                .is_some_and(|entry| entry.snapshot.status == RunStatus::Running)
            {
                return Err(SimulatorError::Busy(kind));
            }
            let handle = RunHandle { id: Uuid::new_v4(), kind, cancel: CancellationToken::new() };
            runs.insert(
                kind,
                RunEntry {
                    snapshot: RunSnapshot {
                        id: handle.id,
                        kind,
                        status: RunStatus::Running,
                        progress: 0,
                        log: Vec::new(),
                        outcome: None,
                    },
                    cancel: handle.cancel.clone(),
                },
            );
            handle
        };
        info!(%kind, run_id = %handle.id, "simulator: run started");
        self.revision.bump();
        Ok(handle)
    }

    /// Mutate the snapshot of a live run. Returns `false` (and changes
    /// nothing) if the run was cancelled, finished, or replaced.
    pub fn update(&self, handle: &RunHandle, f: impl FnOnce(&mut RunSnapshot)) -> bool {
        let applied = {
            let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
            match runs.get_mut(&handle.kind) {
                Some(entry)
                    if entry.snapshot.id == handle.id
                        && entry.snapshot.status == RunStatus::Running
                        && !entry.cancel.is_cancelled() =>
                {
                    f(&mut entry.snapshot);
                    true
                }
                _ => false,
            }
        };
        if applied {
            self.revision.bump();
        }
        applied
    }

    /// Apply a scripted step to a live run.
    pub fn apply_step(&self, handle: &RunHandle, step: &Step) -> bool {
        self.update(handle, |snapshot| snapshot.apply(step))
    }

    /// Mark a live run terminal. `None` keeps the current outcome.
    pub fn finish(&self, handle: &RunHandle, status: RunStatus, outcome: Option<serde_json::Value>) -> bool {
        let applied = self.update(handle, |snapshot| {
            snapshot.status = status;
            if outcome.is_some() {
                snapshot.outcome = outcome;
            }
        });
        if applied {
            info!(kind = %handle.kind, run_id = %handle.id, ?status, "simulator: run finished");
        }
        applied
    }

    /// Cancel the running run of `kind`, if any. Returns whether one was
    /// cancelled.
    pub fn cancel(&self, kind: SimulatorKind) -> bool {
        let cancelled = {
            let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
            match runs.get_mut(&kind) {
                Some(entry) if entry.snapshot.status == RunStatus::Running => {
                    entry.cancel.cancel();
                    entry.snapshot.status = RunStatus::Cancelled;
                    Some(entry.snapshot.id)
                }
                _ => None,
            }
        };
        if let Some(run_id) = cancelled {
            info!(%kind, %run_id, "simulator: run cancelled");
            self.revision.bump();
        }
        cancelled.is_some()
    }

    #[must_use]
    pub fn get(&self, kind: SimulatorKind) -> Option<RunSnapshot> {
        let runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        runs.get(&kind).map(|entry| entry.snapshot.clone())
    }

    /// Latest run of every kind, in [`SimulatorKind::ALL`] order.
    #[must_use]
    pub fn all(&self) -> Vec<RunSnapshot> {
        let runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        SimulatorKind::ALL
            .iter()
            .filter_map(|kind| runs.get(kind).map(|entry| entry.snapshot.clone()))
            .collect()
    }

    /// Replay `steps` into the run behind `handle`. Returns `true` if every
    /// step landed.
    pub async fn run_script<I>(&self, handle: &RunHandle, steps: I) -> bool
    where
        I: IntoIterator<Item = Step>,
    {
        let mut live = true;
        let completed = replay(steps, &handle.cancel, |step| {
            live &= self.apply_step(handle, step);
        })
        .await;
        completed && live
    }
}

#[cfg(test)]
#[path = "simulator_test.rs"]
mod tests;
