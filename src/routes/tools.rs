//! Stateless tool routes: generator, guides, map, downloads, share.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::services::downloads::{self, DownloadEntry, Platform, SharePayload};
use crate::services::extractor::{self, Guide};
use crate::services::generator::{self, GeneratedPassword, GeneratorOptions};
use crate::services::neighborhood::{self, Analysis, Coordinates, MapView};
use crate::state::AppState;

/// Position reported by the browser, if it shared one.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open_only: bool,
}

impl MapQuery {
    fn position(&self) -> Option<Coordinates> {
        Some(Coordinates { latitude: self.latitude?, longitude: self.longitude? })
    }
}

/// `POST /api/generator`
pub async fn generate_password(Json(options): Json<GeneratorOptions>) -> Json<GeneratedPassword> {
    Json(generator::generate(&options, &mut rand::rng()))
}

/// `GET /api/extractor/guides/{platform}`
pub async fn guide(State(state): State<AppState>, Path(platform): Path<String>) -> Result<Json<Guide>, ApiError> {
    let platform: Platform = platform.parse()?;
    Ok(Json(extractor::guide(platform, state.language().await)))
}

/// `GET /api/map?latitude=..&longitude=..&openOnly=true`
pub async fn map(State(state): State<AppState>, Query(query): Query<MapQuery>) -> Json<MapView> {
    Json(neighborhood::map_view(&state, query.position(), query.open_only).await)
}

/// `POST /api/map/analysis` `{ "latitude": .., "longitude": .. }`
pub async fn map_analysis(State(state): State<AppState>, Json(query): Json<MapQuery>) -> Json<Analysis> {
    Json(neighborhood::analyze(&state, query.position()).await)
}

/// `GET /api/downloads`
pub async fn downloads() -> Json<Vec<DownloadEntry>> {
    Json(downloads::catalog())
}

/// `GET /api/share`
pub async fn share(State(state): State<AppState>) -> Json<SharePayload> {
    Json(downloads::share_payload(&state.config.share_url, state.language().await))
}
