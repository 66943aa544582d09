//! REST API handlers and shared response types

pub mod health;
pub mod school;
pub mod student;

use crate::error::{AppError, Result};
use axum::http::Method;
use serde::{Deserialize, Serialize};

pub const POST_EXPECTED_MESSAGE: &str = "POST request expected";

/// Message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Both operations are routed for every method and reject anything but POST
/// themselves, before the body is looked at.
pub(crate) fn require_post(method: &Method) -> Result<()> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(AppError::Validation(POST_EXPECTED_MESSAGE.to_string()))
    }
}
