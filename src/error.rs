//! Domain-specific error types for enfermedad-predictor

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::render;

/// Main error type for the predictor service
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PredictorError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PredictorError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictorError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            PredictorError::Storage { .. }
            | PredictorError::Config { .. }
            | PredictorError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for PredictorError {
    fn from(err: anyhow::Error) -> Self {
        PredictorError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PredictorError {
    fn from(err: std::io::Error) -> Self {
        PredictorError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for PredictorError {
    fn from(err: csv::Error) -> Self {
        PredictorError::Storage {
            message: format!("CSV log error: {}", err),
        }
    }
}

impl From<serde_json::Error> for PredictorError {
    fn from(err: serde_json::Error) -> Self {
        PredictorError::Internal {
            message: format!("Serialization error: {}", err),
        }
    }
}

impl From<tokio::task::JoinError> for PredictorError {
    fn from(err: tokio::task::JoinError) -> Self {
        PredictorError::Internal {
            message: format!("Blocking task failed: {}", err),
        }
    }
}

impl IntoResponse for PredictorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            render::error_page(status, &self.to_string()),
        )
            .into_response()
    }
}

/// Result type alias for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;
