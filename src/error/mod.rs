//! Unified error handling for Catalog Core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Zero rows matched. A normal outcome, never logged as an error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed caller-supplied input, rejected before any store access.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The write would break a uniqueness rule of the catalog.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store rejected or could not execute a statement.
    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    /// No pooled connection became available within the wait bound.
    #[error("Connection pool exhausted: no connection available after {0:?}")]
    PoolExhausted(Duration),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable failure tag handed to callers
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Conflict(_) => "conflict",
            AppError::QueryFailed(_) => "query_failed",
            AppError::PoolExhausted(_) => "pool_exhausted",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::QueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PoolExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store and pool failures were already logged where they were detected.
        let message = match &self {
            AppError::NotFound(msg) | AppError::InvalidInput(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::QueryFailed(_) => "A database error occurred".to_string(),
            AppError::PoolExhausted(_) => {
                "The service is busy, please retry shortly".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: self.kind().to_string(),
            message,
        });

        (self.status_code(), body).into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(errors.to_string())
    }
}
