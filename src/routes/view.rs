//! View routes: snapshot, SSE stream, navigation, language, i18n catalog.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::WatchStream;
use tracing::warn;

use crate::i18n::{self, Language};
use crate::services::view::{self as view_service, DashboardSnapshot, Tab};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ViewBody {
    pub tab: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageBody {
    pub language: String,
}

/// `GET /api/state`
pub async fn state(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(view_service::snapshot(&state).await)
}

/// `GET /api/events`: one `snapshot` event now, then one per revision.
/// Bursts of revisions collapse into a single event.
pub async fn events(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.revision.subscribe()).then(move |_| {
        let state = state.clone();
        async move {
            let snapshot = view_service::snapshot(&state).await;
            let event = Event::default().event("snapshot").json_data(&snapshot).unwrap_or_else(|e| {
                warn!(error = %e, "view: snapshot encode failed");
                Event::default().event("error").data(e.to_string())
            });
            Ok(event)
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// `PUT /api/view` `{ "tab": "..." }`; unknown tabs land on the dashboard.
pub async fn navigate(State(state): State<AppState>, Json(body): Json<ViewBody>) -> Json<DashboardSnapshot> {
    view_service::navigate(&state, Tab::parse_or_default(&body.tab)).await;
    Json(view_service::snapshot(&state).await)
}

/// `PUT /api/language` `{ "language": "en-US" }`; unknown codes fall back.
pub async fn set_language(
    State(state): State<AppState>,
    Json(body): Json<LanguageBody>,
) -> Json<DashboardSnapshot> {
    view_service::set_language(&state, Language::parse_or_fallback(&body.language)).await;
    Json(view_service::snapshot(&state).await)
}

/// `GET /api/i18n/{lang}`
pub async fn catalog(Path(lang): Path<String>) -> Json<HashMap<&'static str, &'static str>> {
    Json(i18n::catalog(Language::parse_or_fallback(&lang)))
}
