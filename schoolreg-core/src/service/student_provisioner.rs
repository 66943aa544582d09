//! Student account provisioning business logic

use crate::domain::{
    email_domain, CreateStudentAccountInput, NewStudentAccount, StudentAccount,
    EMAIL_ALREADY_REGISTERED_MESSAGE, NO_SCHOOL_FOR_DOMAIN_MESSAGE,
    STUDENT_EMAIL_REQUIRED_MESSAGE,
};
use crate::error::{AppError, Result};
use crate::keycloak::IdentityProvider;
use crate::repository::SchoolRepository;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use validator::Validate;

use super::outcome_label;

pub struct StudentProvisioner<R: SchoolRepository, P: IdentityProvider> {
    repo: Arc<R>,
    provider: Arc<P>,
}

impl<R: SchoolRepository, P: IdentityProvider> StudentProvisioner<R, P> {
    pub fn new(repo: Arc<R>, provider: Arc<P>) -> Self {
        Self { repo, provider }
    }

    pub async fn provision(&self, input: CreateStudentAccountInput) -> Result<StudentAccount> {
        let start = Instant::now();
        let result = self.provision_inner(input).await;

        counter!("schoolreg_student_accounts_total", "outcome" => outcome_label(&result))
            .increment(1);
        histogram!("schoolreg_student_provisioning_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        result
    }

    async fn provision_inner(&self, input: CreateStudentAccountInput) -> Result<StudentAccount> {
        let email = match (input.validate(), input.student_email) {
            (Ok(()), Some(email)) => email,
            _ => {
                return Err(AppError::Validation(
                    STUDENT_EMAIL_REQUIRED_MESSAGE.to_string(),
                ))
            }
        };

        // An address without '@' has no domain and cannot match any school
        let domain = email_domain(&email)
            .ok_or_else(|| AppError::NotFound(NO_SCHOOL_FOR_DOMAIN_MESSAGE.to_string()))?;

        let school = self
            .repo
            .find_first_by_domain(domain)
            .await?
            .ok_or_else(|| {
                info!(domain = %domain, "No school registered for domain");
                AppError::NotFound(NO_SCHOOL_FOR_DOMAIN_MESSAGE.to_string())
            })?;

        let account = NewStudentAccount {
            email,
            password: school.shared_password,
            email_verified: true,
        };

        let uid = self
            .provider
            .create_account(&account)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => {
                    AppError::Conflict(EMAIL_ALREADY_REGISTERED_MESSAGE.to_string())
                }
                other => other,
            })?;

        info!(
            uid = %uid,
            school_name = %school.school_name,
            "Student account created"
        );

        Ok(StudentAccount {
            uid,
            password_assigned: account.password,
        })
    }
}
