//! School registration repository

use crate::domain::{NewSchoolRegistration, SchoolRegistration};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

/// Lookups compare names and domains byte for byte: no case folding and no
/// trailing-space padding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn find_by_name(&self, school_name: &str) -> Result<Option<SchoolRegistration>>;
    /// First registration whose domain equals `domain` exactly, oldest first.
    async fn find_first_by_domain(&self, domain: &str) -> Result<Option<SchoolRegistration>>;
    /// Insert keyed by school name. Returns `None` if the name is already taken.
    async fn create_if_absent(
        &self,
        input: &NewSchoolRegistration,
    ) -> Result<Option<SchoolRegistration>>;
    async fn ping(&self) -> Result<()>;
}

pub struct SchoolRepositoryImpl {
    pool: MySqlPool,
}

impl SchoolRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for SchoolRepositoryImpl {
    async fn find_by_name(&self, school_name: &str) -> Result<Option<SchoolRegistration>> {
        let school = sqlx::query_as::<_, SchoolRegistration>(
            r#"
            SELECT school_name, admin_email, domain, shared_password, registered_at
            FROM school_registrations
            WHERE name_key = UNHEX(SHA2(?, 256)) AND school_name = ?
            "#,
        )
        .bind(school_name)
        .bind(school_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(school)
    }

    async fn find_first_by_domain(&self, domain: &str) -> Result<Option<SchoolRegistration>> {
        let school = sqlx::query_as::<_, SchoolRegistration>(
            r#"
            SELECT school_name, admin_email, domain, shared_password, registered_at
            FROM school_registrations
            WHERE domain = ?
            ORDER BY registered_at ASC, school_name ASC
            LIMIT 1
            "#,
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(school)
    }

    async fn create_if_absent(
        &self,
        input: &NewSchoolRegistration,
    ) -> Result<Option<SchoolRegistration>> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO school_registrations
                (school_name, admin_email, domain, shared_password, registered_at)
            VALUES (?, ?, ?, ?, NOW(6))
            "#,
        )
        .bind(&input.school_name)
        .bind(&input.admin_email)
        .bind(&input.domain)
        .bind(&input.shared_password)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        self.find_by_name(&input.school_name)
            .await?
            .map(Some)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create school registration")))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
