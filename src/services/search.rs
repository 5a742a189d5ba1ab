//! Global search — web-grounded answers with source links.

use serde::Serialize;
use tracing::{info, warn};

use super::ai::{self, AiError};
use crate::error::ErrorCode;
use crate::i18n::{Language, translate};
use crate::llm::{Citation, GenerateRequest, Grounding};
use crate::rate_limit::AiFeature;
use crate::state::AppState;

/// Link used when a citation carries no URI.
pub const MISSING_URI: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub text: String,
    pub sources: Vec<Source>,
}

/// Search panel state. `seq` identifies the latest query; answers to older
/// queries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub seq: u64,
    pub query: String,
    pub loading: bool,
    pub result: Option<SearchResult>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,
    #[error("search {0} was superseded by a newer query")]
    Superseded(u64),
    #[error(transparent)]
    Ai(#[from] AiError),
}

impl ErrorCode for SearchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "E_EMPTY_QUERY",
            Self::Superseded(_) => "E_SUPERSEDED",
            Self::Ai(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Ai(e) if e.retryable())
    }

    fn status(&self) -> axum::http::StatusCode {
        match self {
            Self::EmptyQuery => axum::http::StatusCode::BAD_REQUEST,
            Self::Superseded(_) => axum::http::StatusCode::CONFLICT,
            Self::Ai(e) => e.status(),
        }
    }
}

#[must_use]
pub fn build_prompt(query: &str, language: Language) -> String {
    format!("Respond in language {}: {query}", language.label())
}

#[must_use]
pub fn to_sources(citations: Vec<Citation>, language: Language) -> Vec<Source> {
    citations
        .into_iter()
        .map(|c| Source {
            title: c.title.unwrap_or_else(|| translate("search.source_fallback", language).to_string()),
            uri: c.uri.unwrap_or_else(|| MISSING_URI.to_string()),
        })
        .collect()
}

/// Run a grounded search for `query`, replacing the previous result.
///
/// # Errors
///
/// [`SearchError::EmptyQuery`] without a remote call, `Superseded` when a
/// newer query started meanwhile, or the remote failure.
pub async fn search(state: &AppState, query: &str) -> Result<SearchResult, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let (seq, language) = {
        let mut ws = state.workspace.write().await;
        ws.search.seq += 1;
        ws.search.query = query.to_owned();
        ws.search.loading = true;
        ws.search.result = None;
        (ws.search.seq, ws.language)
    };
    state.touch();
    info!(seq, query_len = query.len(), "search: requested");

    let request = GenerateRequest {
        grounding: Some(Grounding::Search),
        ..GenerateRequest::prompt(build_prompt(query, language))
    };
    let outcome = ai::generate(state, AiFeature::Search, &request).await;

    let mut ws = state.workspace.write().await;
    if ws.search.seq != seq {
        return Err(SearchError::Superseded(seq));
    }
    ws.search.loading = false;
    let result = match outcome {
        Ok(response) => {
            let result = SearchResult { text: response.text, sources: to_sources(response.citations, language) };
            info!(seq, sources = result.sources.len(), "search: answered");
            ws.search.result = Some(result.clone());
            Ok(result)
        }
        Err(e) => {
            warn!(seq, error = %e, "search: failed");
            Err(e.into())
        }
    };
    drop(ws);
    state.touch();
    result
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
