//! Route handlers. Request and response bodies are plain serde structs.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use awellbeing::{NewEntry, UserStats};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

const NO_MESSAGE: &str = "No message provided";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    fn into_message(self) -> Result<String, ApiError> {
        self.message
            .filter(|message| !message.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest(NO_MESSAGE.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionChatResponse {
    pub response: String,
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub knowledge_items: usize,
}

/// `POST /chat`: one retrieval-augmented answer, no history.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let message = request.into_message()?;

    let answer = state.retrieval.answer(&message, state.top_k).await?;
    Ok(Json(ChatResponse {
        response: answer.answer,
    }))
}

/// `POST /sessions/{id}/chat`: one exchange on the session's transcript.
pub async fn session_chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<SessionChatResponse>, ApiError> {
    let Json(request) = payload?;
    let message = request.into_message()?;

    let session = state.session(&session_id);
    let reply = state.chat.respond(&session, message).await;
    Ok(Json(SessionChatResponse {
        response: reply.text().to_string(),
        degraded: reply.is_degraded(),
    }))
}

/// `DELETE /sessions/{id}`
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = state.session(&session_id);
    if state.chat.reset(&session).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("session '{session_id}' has no transcript")))
    }
}

/// `GET /api/user/{id}/stats`
pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserStats>, ApiError> {
    Ok(Json(state.wellbeing.stats(&user_id).await?))
}

/// `POST /api/entries`: a missing date means today in local time.
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<NewEntry>), ApiError> {
    let Json(new_entry) = payload?;
    let entry = new_entry.into_entry(Local::now().date_naive())?;
    let stored = NewEntry::from(&entry);

    state.wellbeing.record(entry).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        knowledge_items: state.knowledge_items(),
    })
}
