//! HTTP middleware for SchoolReg Core

pub mod metrics;

pub use metrics::ObservabilityLayer;
