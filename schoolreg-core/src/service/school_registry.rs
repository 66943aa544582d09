//! School registration business logic

use crate::domain::{
    RegisterSchoolInput, SchoolRegistration, MISSING_FIELDS_MESSAGE,
    SCHOOL_ALREADY_REGISTERED_MESSAGE,
};
use crate::error::{AppError, Result};
use crate::repository::SchoolRepository;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::outcome_label;

pub struct SchoolRegistry<R: SchoolRepository> {
    repo: Arc<R>,
}

impl<R: SchoolRepository> SchoolRegistry<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn register(&self, input: RegisterSchoolInput) -> Result<SchoolRegistration> {
        let start = Instant::now();
        let result = self.register_inner(input).await;

        counter!("schoolreg_school_registrations_total", "outcome" => outcome_label(&result))
            .increment(1);
        histogram!("schoolreg_school_registration_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        result
    }

    async fn register_inner(&self, input: RegisterSchoolInput) -> Result<SchoolRegistration> {
        let new = input
            .into_new_registration()
            .ok_or_else(|| AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;

        if self.repo.find_by_name(&new.school_name).await?.is_some() {
            info!(school_name = %new.school_name, "School already registered");
            return Err(AppError::Conflict(
                SCHOOL_ALREADY_REGISTERED_MESSAGE.to_string(),
            ));
        }

        // The insert itself is conditional, so a concurrent registration that
        // slipped past the check above still ends up as a conflict.
        let school = self.repo.create_if_absent(&new).await?.ok_or_else(|| {
            info!(school_name = %new.school_name, "School registered concurrently");
            AppError::Conflict(SCHOOL_ALREADY_REGISTERED_MESSAGE.to_string())
        })?;

        info!(
            school_name = %school.school_name,
            domain = %school.domain,
            "School registered"
        );
        Ok(school)
    }
}
