//! Port for enrollment persistence.
//!
//! The store owns identifier assignment, ordering, filter evaluation and the
//! partial update of the status column. Updates touch only the fields that are
//! present and must report [`EnrollmentRepositoryError::NotFound`] when no
//! record matched.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Enrollment, EnrollmentFilter, EnrollmentId, EnrollmentStatus, NewEnrollment,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
        /// No enrollment matched the identifier.
        NotFound { id: String } => "enrollment {id} not found",
    }
}

/// Persistence port for enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Persist a draft and return the stored record with its assigned id.
    async fn create(&self, draft: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Return one window of matching enrollments, most recent first.
    async fn list(
        &self,
        filter: &EnrollmentFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Count enrollments matching `filter`.
    async fn count(&self, filter: &EnrollmentFilter) -> Result<u64, EnrollmentRepositoryError>;

    /// Apply the present fields to the enrollment identified by `id`.
    async fn update(
        &self,
        id: &EnrollmentId,
        status: Option<EnrollmentStatus>,
    ) -> Result<(), EnrollmentRepositoryError>;
}

/// Stand-in used when no database is configured.
///
/// Creation echoes the draft with a fresh id, reads are empty, and every
/// update reports not found because nothing is ever stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn create(&self, draft: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError> {
        Ok(draft
            .clone()
            .into_enrollment(EnrollmentId::new(Uuid::new_v4().to_string()), Utc::now()))
    }

    async fn list(
        &self,
        _filter: &EnrollmentFilter,
        _offset: u64,
        _limit: u64,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn count(&self, _filter: &EnrollmentFilter) -> Result<u64, EnrollmentRepositoryError> {
        Ok(0)
    }

    async fn update(
        &self,
        id: &EnrollmentId,
        _status: Option<EnrollmentStatus>,
    ) -> Result<(), EnrollmentRepositoryError> {
        Err(EnrollmentRepositoryError::not_found(id.as_str()))
    }
}
