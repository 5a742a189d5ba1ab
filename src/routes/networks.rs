//! Scanner and audit routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::audit::{self, AuditState, SecurityReport};
use crate::services::scanner::{self, NetworkFilter, NetworkRecord};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub filter: NetworkFilter,
}

#[derive(Debug, Serialize)]
pub struct Selected {
    pub generation: u64,
}

#[derive(Debug, Serialize)]
pub struct AuditView {
    pub selected: Option<NetworkRecord>,
    pub generation: u64,
    pub audit: AuditState,
}

/// `GET /api/networks?filter=open|secured`
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Vec<NetworkRecord>> {
    Json(scanner::list(&state, query.filter).await)
}

/// `POST /api/networks/rescan`: 202 once the scan window is open.
pub async fn rescan(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    scanner::open_window(&state).await?;
    tokio::spawn(async move { scanner::complete_scan(&state).await });
    Ok(StatusCode::ACCEPTED)
}

/// `POST /api/networks/{id}/select`: selects and starts the audit in the
/// background.
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Selected>), ApiError> {
    let generation = audit::select_network(&state, &id).await?;
    audit::spawn_audit(state, generation);
    Ok((StatusCode::ACCEPTED, Json(Selected { generation })))
}

/// `GET /api/audit`
pub async fn audit(State(state): State<AppState>) -> Json<AuditView> {
    let ws = state.workspace.read().await;
    Json(AuditView {
        selected: ws.selection.network.clone(),
        generation: ws.selection.generation,
        audit: ws.audit.clone(),
    })
}

/// `POST /api/audit`: re-run the audit and wait for the report.
pub async fn run_audit(State(state): State<AppState>) -> Result<Json<SecurityReport>, ApiError> {
    Ok(Json(audit::run_audit(&state).await?))
}
