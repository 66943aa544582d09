//! Keycloak type definitions

use crate::domain::NewStudentAccount;
use serde::{Deserialize, Serialize};

/// Input for creating a user in Keycloak
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeycloakUserInput {
    pub username: String,
    pub email: String,
    pub enabled: bool,
    pub email_verified: bool,
    pub credentials: Vec<KeycloakCredential>,
}

/// Keycloak credential for user creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakCredential {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub value: String,
    pub temporary: bool,
}

impl From<&NewStudentAccount> for CreateKeycloakUserInput {
    fn from(account: &NewStudentAccount) -> Self {
        Self {
            username: account.email.clone(),
            email: account.email.clone(),
            enabled: true,
            email_verified: account.email_verified,
            credentials: vec![KeycloakCredential {
                credential_type: "password".to_string(),
                value: account.password.clone(),
                temporary: false,
            }],
        }
    }
}

/// Admin token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}
