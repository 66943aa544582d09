//! Student account API handler

use crate::api::require_post;
use crate::domain::{CreateStudentAccountInput, StudentAccount, STUDENT_CREATED_MESSAGE};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Success body. The shared password is echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAccountResponse {
    pub message: String,
    pub uid: String,
    pub password_assigned: String,
}

impl From<StudentAccount> for StudentAccountResponse {
    fn from(account: StudentAccount) -> Self {
        Self {
            message: STUDENT_CREATED_MESSAGE.to_string(),
            uid: account.uid,
            password_assigned: account.password_assigned,
        }
    }
}

/// Create a student account
pub async fn create<S: HasServices>(
    State(state): State<S>,
    method: Method,
    body: std::result::Result<Json<CreateStudentAccountInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    require_post(&method)?;

    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!("Unreadable student account body: {}", rejection);
            CreateStudentAccountInput::default()
        }
    };

    let account = state.student_provisioner().provision(input).await?;
    Ok(Json(StudentAccountResponse::from(account)))
}
