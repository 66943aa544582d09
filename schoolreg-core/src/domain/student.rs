//! Student account domain model

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const STUDENT_EMAIL_REQUIRED_MESSAGE: &str = "Student email required";
pub const NO_SCHOOL_FOR_DOMAIN_MESSAGE: &str = "No school found for this domain";
pub const EMAIL_ALREADY_REGISTERED_MESSAGE: &str = "Email already registered";
pub const STUDENT_CREATED_MESSAGE: &str = "Student account created successfully";

/// Request body for creating a student account
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentAccountInput {
    #[validate(required, length(min = 1))]
    pub student_email: Option<String>,
}

/// Account to be created in the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudentAccount {
    pub email: String,
    pub password: String,
    /// Students are created pre-verified
    pub email_verified: bool,
}

/// Result of a successful student provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAccount {
    /// Identifier assigned by the identity provider
    pub uid: String,
    pub password_assigned: String,
}

/// Everything after the first `@`.
///
/// No other shape checks are made: `"a@b@c"` yields `"b@c"` and `"bob@"`
/// yields an empty domain. `None` only when there is no `@` at all.
pub fn email_domain(email: &str) -> Option<&str> {
    email.split_once('@').map(|(_, domain)| domain)
}
