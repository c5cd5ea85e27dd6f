use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Firebase error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Form is incomplete")]
    FormIncomplete,

    #[error("{0}")]
    CredentialMismatch(String),

    #[error("{0}")]
    FetchFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::FormIncomplete => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::CredentialMismatch(reason) => (StatusCode::UNAUTHORIZED, reason),
            AppError::FetchFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Http(_) | AppError::Json(_) | AppError::Remote { .. } => {
                error!("upstream error: {}", self);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
