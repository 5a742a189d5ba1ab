//! Simulator routes: start, read, and cancel runs.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::error::ApiError;
use crate::services::downloads::{self, Platform};
use crate::services::extractor;
use crate::services::simulator::{RunSnapshot, SimulatorError, SimulatorKind};
use crate::services::zero_key;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ZeroKeyBody {
    #[serde(alias = "networkId")]
    pub network_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadBody {
    pub platform: String,
}

type Started = (StatusCode, Json<RunSnapshot>);

/// `POST /api/simulators/zero-key` `{ "network_id": "1" }`
pub async fn zero_key(State(state): State<AppState>, Json(body): Json<ZeroKeyBody>) -> Result<Started, ApiError> {
    let run = zero_key::start(&state, &body.network_id).await?;
    Ok((StatusCode::ACCEPTED, Json(run)))
}

/// `POST /api/simulators/download` `{ "platform": "android" }`
pub async fn download(State(state): State<AppState>, Json(body): Json<DownloadBody>) -> Result<Started, ApiError> {
    let platform: Platform = body.platform.parse()?;
    let run = downloads::start(&state, platform)?;
    Ok((StatusCode::ACCEPTED, Json(run)))
}

/// `POST /api/simulators/key-extraction`
pub async fn key_extraction(State(state): State<AppState>) -> Result<Started, ApiError> {
    let run = extractor::start(&state)?;
    Ok((StatusCode::ACCEPTED, Json(run)))
}

/// `GET /api/simulators/{kind}`
pub async fn get_run(State(state): State<AppState>, Path(kind): Path<String>) -> Result<Json<RunSnapshot>, ApiError> {
    let kind: SimulatorKind = kind.parse()?;
    let run = state.simulators.get(kind).ok_or(SimulatorError::NotFound(kind))?;
    Ok(Json(run))
}

/// `DELETE /api/simulators/{kind}`: cancels a live run and returns the
/// latest snapshot either way.
pub async fn cancel_run(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<RunSnapshot>, ApiError> {
    let kind: SimulatorKind = kind.parse()?;
    state.simulators.cancel(kind);
    let run = state.simulators.get(kind).ok_or(SimulatorError::NotFound(kind))?;
    Ok(Json(run))
}
