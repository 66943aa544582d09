//! Unified error handling for SchoolReg Core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Message returned to callers for every unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error category.
    ///
    /// Caller-side rejections all share 400; the category is carried by the
    /// error message.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::IdentityProvider(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::IdentityProvider(msg) => {
                tracing::error!("Identity provider error: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
