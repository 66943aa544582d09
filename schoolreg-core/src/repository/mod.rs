//! Data access layer (Repository pattern)

pub mod school;

pub use school::{SchoolRepository, SchoolRepositoryImpl};
