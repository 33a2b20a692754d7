//! Common error type and alias.
//!
//! Every failure ends up as one human-readable string for the caller:
//! validation messages are shown as-is, everything else is prefixed with
//! `An error occurred:`.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed user input. The message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    /// Request body over the configured upload limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Gemini answered with a non-success status.
    #[error("Gemini API error: {status} - {message}")]
    Gemini { status: u16, message: String },

    #[error("content blocked: {0}")]
    ContentBlocked(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The model answered but produced nothing usable.
    #[error("{0}")]
    Generation(String),

    #[error("failed to decode: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt construction failed: {0}")]
    PromptConstruction(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// The single string shown to whoever triggered the workflow.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            other => format!("An error occurred: {}", other),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::HttpClient(_)
            | AppError::Gemini { .. }
            | AppError::ContentBlocked(_)
            | AppError::UnexpectedResponse(_)
            | AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

/// Keeps upstream error bodies short enough to display.
pub fn truncate_message(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut)
}
