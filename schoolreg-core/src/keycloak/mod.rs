//! Identity provider integration
//!
//! Student accounts live entirely in Keycloak; this module exposes the
//! [`IdentityProvider`] port used by the student provisioner and its
//! Keycloak Admin API implementation.

mod client;
mod types;

pub use client::KeycloakClient;
pub use types::{CreateKeycloakUserInput, KeycloakCredential};

use crate::domain::NewStudentAccount;
use crate::error::Result;
use async_trait::async_trait;

/// Account creation in an external identity provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and return its identifier.
    ///
    /// Fails with `AppError::Conflict` when the email is already in use.
    async fn create_account(&self, account: &NewStudentAccount) -> Result<String>;
}
