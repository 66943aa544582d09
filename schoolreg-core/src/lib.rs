//! SchoolReg Core - School Registration Service Backend
//!
//! This crate registers schools in a document store and provisions student
//! accounts in Keycloak, exposed as two HTTP operations.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod keycloak;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
