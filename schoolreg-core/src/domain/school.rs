//! School registration domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const SCHOOL_ALREADY_REGISTERED_MESSAGE: &str = "School already registered";
pub const SCHOOL_REGISTERED_MESSAGE: &str = "School registered successfully";

/// A registered school. The school name is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRegistration {
    pub school_name: String,
    pub admin_email: String,
    /// Email domain (the part after `@`) shared by this school's students
    pub domain: String,
    /// Stored as given; assigned to every student account of the school
    pub shared_password: String,
    pub registered_at: DateTime<Utc>,
}

impl Default for SchoolRegistration {
    fn default() -> Self {
        Self {
            school_name: "Test School".to_string(),
            admin_email: "admin@test.edu".to_string(),
            domain: "test.edu".to_string(),
            shared_password: "shared-secret".to_string(),
            registered_at: Utc::now(),
        }
    }
}

/// Request body for registering a school
///
/// Fields are optional at the wire level so that absent, null and empty
/// values are all reported as the same validation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSchoolInput {
    #[validate(required, length(min = 1))]
    pub school_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub admin_email: Option<String>,
    #[validate(required, length(min = 1))]
    pub domain: Option<String>,
    #[validate(required, length(min = 1))]
    pub shared_password: Option<String>,
}

/// A validated school registration, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchoolRegistration {
    pub school_name: String,
    pub admin_email: String,
    pub domain: String,
    pub shared_password: String,
}

impl RegisterSchoolInput {
    /// Validate the request and take ownership of its fields.
    pub fn into_new_registration(self) -> Option<NewSchoolRegistration> {
        if self.validate().is_err() {
            return None;
        }
        Some(NewSchoolRegistration {
            school_name: self.school_name?,
            admin_email: self.admin_email?,
            domain: self.domain?,
            shared_password: self.shared_password?,
        })
    }
}
