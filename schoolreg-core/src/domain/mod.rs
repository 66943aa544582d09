//! Domain models for SchoolReg Core

pub mod school;
pub mod student;

pub use school::*;
pub use student::*;
