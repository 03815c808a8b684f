//! API errors rendered as `{"error": ...}` JSON bodies, and server start-up
//! errors.

use std::fmt::{Display, Formatter};

use achat::{ChatError, ChatErrorKind};
use arag::{RetrievalError, RetrievalErrorKind};
use awellbeing::{WellbeingError, WellbeingErrorKind};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "request failed");
        }

        let error = match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::UnprocessableEntity(message)
            | Self::Internal(message) => message,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => Self::UnprocessableEntity(rejection.body_text()),
            _ => Self::BadRequest(rejection.body_text()),
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(error: RetrievalError) -> Self {
        match error.kind {
            RetrievalErrorKind::InvalidRequest => Self::BadRequest(error.message),
            _ => Self::Internal(error.to_string()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        match error.kind {
            ChatErrorKind::InvalidRequest => Self::BadRequest(error.message),
            _ => Self::Internal(error.to_string()),
        }
    }
}

impl From<WellbeingError> for ApiError {
    fn from(error: WellbeingError) -> Self {
        match error.kind {
            WellbeingErrorKind::InvalidEntry => Self::UnprocessableEntity(error.message),
            _ => Self::Internal(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerErrorKind {
    Config,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    pub kind: ServerErrorKind,
    pub message: String,
}

impl ServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ServerErrorKind::Config,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ServerErrorKind::Io,
            message: message.into(),
        }
    }
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ServerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wellbeing_validation_maps_to_unprocessable_entity() {
        let error = ApiError::from(WellbeingError::invalid_entry("mood must be between 0 and 10"));
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn upstream_retrieval_failures_are_internal_errors() {
        let error = ApiError::from(RetrievalError::index("cannot index an empty dataset"));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = ApiError::from(RetrievalError::invalid_request("query must not be empty"));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn server_error_display_includes_kind() {
        let error = ServerError::config("invalid CORS origin");
        assert_eq!(error.to_string(), "Config: invalid CORS origin");
    }
}
