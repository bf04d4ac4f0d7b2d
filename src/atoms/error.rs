// ── MindEcho Atoms: Error Types ────────────────────────────────────────────
// Server-side error enum, built with `thiserror`.
//
//   • Core failures arrive through `#[from] CoreError`; caller mistakes in the
//     core (`InvalidInput`) map to 400, everything else to 500.
//   • `IntoResponse` renders every variant as `{"error": "..."}`.
//   • Handlers that must never fail (chat, analyze) degrade before reaching
//     this type; it only surfaces for input validation and storage routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mindecho_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed or missing request payload.
    #[error("{0}")]
    BadRequest(String),

    /// Failure inside mindecho-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration file or environment override is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Socket / filesystem failure while starting up.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Core(CoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ServerError::Core(CoreError::Media(_)) => StatusCode::BAD_REQUEST,
            ServerError::Core(_) | ServerError::Config(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::Core(CoreError::InvalidInput(m)) => m.clone(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            log::error!("[server] {}", message);
        } else {
            log::warn!("[server] {} {}", status.as_u16(), message);
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_core_input_is_a_client_error() {
        let err: ServerError = CoreError::invalid("unknown mood: x").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failure_is_a_server_error() {
        let err: ServerError = CoreError::Other("disk".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
