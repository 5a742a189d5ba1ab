//! Search and assistant routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::assistant::{self, AssistantSession, ChatMessage, QuickQuestion};
use crate::services::search::{self, SearchResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantView {
    pub session: AssistantSession,
    pub quick_questions: Vec<QuickQuestion>,
}

/// `POST /api/search` `{ "query": "..." }`
pub async fn search(State(state): State<AppState>, Json(body): Json<SearchBody>) -> Result<Json<SearchResult>, ApiError> {
    Ok(Json(search::search(&state, &body.query).await?))
}

/// `POST /api/assistant`
pub async fn open(State(state): State<AppState>) -> Json<AssistantView> {
    let session = assistant::open(&state).await;
    let quick_questions = assistant::quick_questions(session.language);
    Json(AssistantView { session, quick_questions })
}

/// `DELETE /api/assistant`
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    assistant::reset(&state).await;
    StatusCode::NO_CONTENT
}

/// `POST /api/assistant/messages` `{ "text": "..." }`
pub async fn send(State(state): State<AppState>, Json(body): Json<MessageBody>) -> Result<Json<ChatMessage>, ApiError> {
    Ok(Json(assistant::send(&state, &body.text).await?))
}
