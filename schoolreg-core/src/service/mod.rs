//! Business logic layer

pub mod school_registry;
pub mod student_provisioner;

pub use school_registry::SchoolRegistry;
pub use student_provisioner::StudentProvisioner;

use crate::error::AppError;

/// Metric label for the outcome of a request
pub(crate) fn outcome_label<T>(result: &Result<T, AppError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(AppError::Validation(_)) => "invalid",
        Err(AppError::Conflict(_)) => "conflict",
        Err(AppError::NotFound(_)) => "not_found",
        Err(_) => "error",
    }
}
