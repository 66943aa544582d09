//! Keycloak Admin API client
//!
//! Handles admin authentication with token caching and the user creation
//! call used to provision student accounts.

use crate::config::KeycloakConfig;
use crate::domain::NewStudentAccount;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::types::{CreateKeycloakUserInput, TokenResponse};
use super::IdentityProvider;

/// Keycloak Admin API client
#[derive(Clone)]
pub struct KeycloakClient {
    config: KeycloakConfig,
    http_client: Client,
    token: Arc<RwLock<Option<AdminToken>>>,
}

#[derive(Debug, Clone)]
struct AdminToken {
    access_token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

impl KeycloakClient {
    /// Create a new Keycloak client
    pub fn new(config: KeycloakConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the realm name
    pub fn realm(&self) -> &str {
        &self.config.realm
    }

    /// Get admin access token (with caching)
    async fn get_admin_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if let Some(ref t) = *token {
                if t.expires_at > chrono::Utc::now() + chrono::Duration::seconds(30) {
                    return Ok(t.access_token.clone());
                }
            }
        }

        let token_url = format!(
            "{}/realms/master/protocol/openid-connect/token",
            self.config.url
        );

        let mut params = vec![
            ("grant_type", "password"),
            ("client_id", self.config.admin_client_id.as_str()),
            ("username", self.config.admin_username.as_str()),
            ("password", self.config.admin_password.as_str()),
        ];

        if !self.config.admin_client_secret.is_empty() {
            params.push(("client_secret", self.config.admin_client_secret.as_str()));
        }

        let response = self
            .http_client
            .post(&token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Failed to get admin token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityProvider(format!(
                "Failed to get admin token: {} - {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AppError::IdentityProvider(format!("Failed to parse token response: {}", e))
        })?;

        let admin_token = AdminToken {
            access_token: token_response.access_token.clone(),
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(token_response.expires_in),
        };

        {
            let mut token = self.token.write().await;
            *token = Some(admin_token);
        }

        Ok(token_response.access_token)
    }

    /// Create a user in Keycloak, returning the new user's ID
    pub async fn create_user(&self, input: &CreateKeycloakUserInput) -> Result<String> {
        let token = self.get_admin_token().await?;
        let url = format!(
            "{}/admin/realms/{}/users",
            self.config.url, self.config.realm
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(input)
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Failed to create user: {}", e)))?;

        if response.status() == StatusCode::CONFLICT {
            return Err(AppError::Conflict(
                "User already exists in Keycloak".to_string(),
            ));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityProvider(format!(
                "Failed to create user: {} - {}",
                status, body
            )));
        }

        // Keycloak answers 201 with the new user's URL in the Location header
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::IdentityProvider("Missing location header".to_string()))?;

        user_id_from_location(location)
            .map(str::to_string)
            .ok_or_else(|| AppError::IdentityProvider("Invalid location header".to_string()))
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    async fn create_account(&self, account: &NewStudentAccount) -> Result<String> {
        self.create_user(&CreateKeycloakUserInput::from(account)).await
    }
}

fn user_id_from_location(location: &str) -> Option<&str> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}
