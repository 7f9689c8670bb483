//! Driving port for enrollment mutations.
//!
//! Inbound adapters hand raw, already shape-checked input to this port; the
//! domain service owns validation of content, existence checks against the
//! user and course services, and persistence.

use async_trait::async_trait;

use crate::domain::{Enrollment, EnrollmentId, Error};

/// Request to enroll a user in a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEnrollmentRequest {
    /// Identifier of the user to enroll.
    pub user_id: String,
    /// Identifier of the course to enroll in.
    pub course_id: String,
}

/// Request to change an enrollment's status.
///
/// `status` stays raw so the service can report unknown codes with the
/// offending value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEnrollmentStatusRequest {
    /// Enrollment to update.
    pub id: EnrollmentId,
    /// New status code, if one was supplied.
    pub status: Option<String>,
}

/// Driving port for enrollment writes.
///
/// # Examples
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # async fn example() -> Result<(), enrollments::domain::Error> {
/// use enrollments::domain::ports::{
///     CreateEnrollmentRequest, EnrollmentCommand, FixtureCourseCatalogue,
///     FixtureEnrollmentRepository, FixtureUserDirectory,
/// };
/// use enrollments::domain::{EnrollmentService, EnrollmentServiceConfig};
///
/// let service = EnrollmentService::new(
///     Arc::new(FixtureEnrollmentRepository),
///     Arc::new(FixtureUserDirectory),
///     Arc::new(FixtureCourseCatalogue),
///     EnrollmentServiceConfig::default(),
/// );
/// let created = service
///     .create_enrollment(CreateEnrollmentRequest {
///         user_id: "u-1".to_owned(),
///         course_id: "c-1".to_owned(),
///     })
///     .await?;
/// assert_eq!(created.status().code(), "P");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Validate the request, confirm both referenced entities exist, and
    /// store a pending enrollment.
    async fn create_enrollment(&self, request: CreateEnrollmentRequest)
    -> Result<Enrollment, Error>;

    /// Validate the status, if present, and apply it to the enrollment.
    async fn update_status(&self, request: UpdateEnrollmentStatusRequest) -> Result<(), Error>;
}
