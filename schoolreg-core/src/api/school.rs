//! School registration API handler

use crate::api::{require_post, MessageResponse};
use crate::domain::{RegisterSchoolInput, SCHOOL_REGISTERED_MESSAGE};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    response::IntoResponse,
    Json,
};

/// Register a school
///
/// A body that is not a JSON object of strings is treated as one with every
/// field missing.
pub async fn register<S: HasServices>(
    State(state): State<S>,
    method: Method,
    body: std::result::Result<Json<RegisterSchoolInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    require_post(&method)?;

    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!("Unreadable school registration body: {}", rejection);
            RegisterSchoolInput::default()
        }
    };

    state.school_registry().register(input).await?;
    Ok(Json(MessageResponse::new(SCHOOL_REGISTERED_MESSAGE)))
}
