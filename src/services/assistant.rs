//! Assistant service — the "Aurora" support chat.
//!
//! DESIGN
//! ======
//! One session per process. The transcript is what the page shows (it opens
//! with the welcome message); the history is what the model sees (user and
//! model turns only). A reply is applied only to the session that asked for
//! it, so a reset while the model is thinking silently drops the answer.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::ai;
use crate::error::ErrorCode;
use crate::i18n::{Language, translate};
use crate::llm::{GenerateRequest, Message};
use crate::rate_limit::AiFeature;
use crate::state::AppState;

pub const TEMPERATURE: f32 = 0.7;
/// Shown when the model answers with nothing.
pub const EMPTY_REPLY: &str = "...";

/// (label key, query key) for each canned prompt.
const QUICK_QUESTIONS: [(&str, &str); 4] = [
    ("assistant.quick.download.label", "assistant.quick.download.query"),
    ("assistant.quick.features.label", "assistant.quick.features.query"),
    ("assistant.quick.author.label", "assistant.quick.author.query"),
    ("assistant.quick.safety.label", "assistant.quick.safety.query"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    fn user(text: &str) -> Self {
        Self { role: ChatRole::User, text: text.to_owned() }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantSession {
    pub id: Uuid,
    pub language: Language,
    pub transcript: Vec<ChatMessage>,
    #[serde(skip)]
    pub history: Vec<Message>,
    #[serde(skip)]
    pub system: String,
    pub typing: bool,
}

impl AssistantSession {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            language,
            transcript: vec![ChatMessage::assistant(translate("assistant.welcome", language))],
            history: Vec::new(),
            system: persona(language),
            typing: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickQuestion {
    pub label: &'static str,
    pub query: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("assistant is still answering")]
    Busy,
    #[error("session was reset before the reply arrived")]
    SessionReset,
}

impl ErrorCode for AssistantError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::Busy => "E_ASSISTANT_BUSY",
            Self::SessionReset => "E_SESSION_RESET",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Busy)
    }

    fn status(&self) -> axum::http::StatusCode {
        match self {
            Self::EmptyMessage => axum::http::StatusCode::BAD_REQUEST,
            Self::Busy | Self::SessionReset => axum::http::StatusCode::CONFLICT,
        }
    }
}

#[must_use]
pub fn persona(language: Language) -> String {
    format!(
        "You are Aurora, the virtual assistant of the \"WiFi WPS 5G\" app, created by the developer Geilson.\n\
         The app is available on Windows (.exe installer), macOS (.dmg), Android (.apk, also via QR code) \
         and iOS (TestFlight, also via QR code).\n\
         Its eight tools are: Scanner, AI Audit, Global Search, Zero-Key, Extractor, Generator, Local Map \
         and Downloads.\n\
         When someone asks how to download, point them to the Downloads tab: the QR code for phones, the \
         installer for PC or Mac.\n\
         Be friendly, technical and concise. Mention Geilson whenever you are asked who made the app.\n\
         Always answer in the language: {}.",
        language.label()
    )
}

#[must_use]
pub fn quick_questions(language: Language) -> Vec<QuickQuestion> {
    QUICK_QUESTIONS
        .iter()
        .map(|&(label, query)| QuickQuestion {
            label: translate(label, language),
            query: translate(query, language),
        })
        .collect()
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Open the session, creating it on first use.
pub async fn open(state: &AppState) -> AssistantSession {
    let (session, created) = {
        let mut ws = state.workspace.write().await;
        let language = ws.language;
        let created = ws.assistant.is_none();
        let session = ws.assistant.get_or_insert_with(|| AssistantSession::new(language)).clone();
        (session, created)
    };
    if created {
        info!(session = %session.id, language = %session.language, "assistant: session opened");
        state.touch();
    }
    session
}

/// Drop the session. Returns whether one existed.
pub async fn reset(state: &AppState) -> bool {
    let dropped = state.workspace.write().await.assistant.take();
    if let Some(session) = &dropped {
        info!(session = %session.id, "assistant: session reset");
        state.touch();
    }
    dropped.is_some()
}

/// Send a user message and wait for the reply. Remote failures become the
/// localized apology in the transcript and are not returned as errors.
///
/// # Errors
///
/// [`AssistantError::EmptyMessage`], [`AssistantError::Busy`] while a reply
/// is pending, and [`AssistantError::SessionReset`] if the session was
/// dropped while waiting.
pub async fn send(state: &AppState, text: &str) -> Result<ChatMessage, AssistantError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AssistantError::EmptyMessage);
    }

    let (id, request) = {
        let mut ws = state.workspace.write().await;
        let language = ws.language;
        let session = ws.assistant.get_or_insert_with(|| AssistantSession::new(language));
        if session.typing {
            return Err(AssistantError::Busy);
        }
        session.transcript.push(ChatMessage::user(text));
        session.history.push(Message::user(text));
        session.typing = true;
        let request = GenerateRequest {
            system: Some(session.system.clone()),
            messages: session.history.clone(),
            temperature: Some(TEMPERATURE),
            ..GenerateRequest::default()
        };
        (session.id, request)
    };
    state.touch();
    info!(session = %id, turns = request.messages.len(), "assistant: message sent");

    let outcome = ai::generate(state, AiFeature::Assistant, &request).await;

    let mut ws = state.workspace.write().await;
    let Some(session) = ws.assistant.as_mut().filter(|s| s.id == id) else {
        info!(session = %id, "assistant: reply dropped for reset session");
        return Err(AssistantError::SessionReset);
    };
    session.typing = false;
    let reply = match outcome {
        Ok(response) => {
            let text = if response.text.trim().is_empty() { EMPTY_REPLY.to_string() } else { response.text };
            session.history.push(Message::model(text.clone()));
            ChatMessage::assistant(text)
        }
        Err(e) => {
            warn!(session = %id, error = %e, "assistant: reply failed");
            session.history.pop();
            ChatMessage::assistant(translate("assistant.error", session.language))
        }
    };
    session.transcript.push(reply.clone());
    drop(ws);
    state.touch();
    Ok(reply)
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
