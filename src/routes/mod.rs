//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON endpoints for every dashboard operation, one SSE stream that pushes a
//! fresh snapshot per state revision, and (when `STATIC_DIR` is set) the page
//! itself served as static files from the fallback route.

pub mod assistant;
pub mod networks;
pub mod simulators;
pub mod tools;
pub mod view;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/state", get(view::state))
        .route("/api/events", get(view::events))
        .route("/api/view", put(view::navigate))
        .route("/api/language", put(view::set_language))
        .route("/api/i18n/{lang}", get(view::catalog))
        .route("/api/networks", get(networks::list))
        .route("/api/networks/rescan", post(networks::rescan))
        .route("/api/networks/{id}/select", post(networks::select))
        .route("/api/audit", get(networks::audit).post(networks::run_audit))
        .route("/api/search", post(assistant::search))
        .route("/api/assistant", post(assistant::open).delete(assistant::reset))
        .route("/api/assistant/messages", post(assistant::send))
        .route("/api/simulators/zero-key", post(simulators::zero_key))
        .route("/api/simulators/download", post(simulators::download))
        .route("/api/simulators/key-extraction", post(simulators::key_extraction))
        .route("/api/simulators/{kind}", get(simulators::get_run).delete(simulators::cancel_run))
        .route("/api/extractor/guides/{platform}", get(tools::guide))
        .route("/api/generator", post(tools::generate_password))
        .route("/api/map", get(tools::map))
        .route("/api/map/analysis", post(tools::map_analysis))
        .route("/api/downloads", get(tools::downloads))
        .route("/api/share", get(tools::share))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
