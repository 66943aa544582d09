//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`] so the same code runs against
//! the production `AppState` and the in-memory state used by tests.

use crate::config::Config;
use crate::keycloak::IdentityProvider;
use crate::repository::SchoolRepository;
use crate::service::{SchoolRegistry, StudentProvisioner};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The school registration repository type
    type SchoolRepo: SchoolRepository;
    /// The identity provider type
    type Provider: IdentityProvider;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the school registry
    fn school_registry(&self) -> &SchoolRegistry<Self::SchoolRepo>;

    /// Get the student provisioner
    fn student_provisioner(&self) -> &StudentProvisioner<Self::SchoolRepo, Self::Provider>;

    /// Check whether the document store is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
