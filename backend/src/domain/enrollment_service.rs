//! Enrollment domain service.
//!
//! Implements [`EnrollmentCommand`] and [`EnrollmentQuery`] on top of the
//! enrollment store and the user/course existence checks. Creation validates
//! identifiers, confirms the user and then the course exist, and stores a
//! pending enrollment. Listing computes the page window from the filtered
//! total. Status updates validate the code before touching the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::{PageMeta, PaginationError};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    CourseCatalogue, CreateEnrollmentRequest, DirectoryError, EnrollmentCommand, EnrollmentQuery,
    EnrollmentRepository, EnrollmentRepositoryError, ListEnrollmentsRequest,
    ListEnrollmentsResponse, UpdateEnrollmentStatusRequest, UserDirectory,
};
use crate::domain::validation::{parse_status, require_non_empty};
use crate::domain::{Enrollment, Error, NewEnrollment};

/// Page size used when neither the request nor configuration provides one.
pub const DEFAULT_PAGE_LIMIT: &str = "10";

/// Tunables for [`EnrollmentService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentServiceConfig {
    default_page_limit: String,
    collaborator_timeout: Option<Duration>,
}

impl Default for EnrollmentServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

impl EnrollmentServiceConfig {
    /// Configure the raw default page limit.
    ///
    /// The value is parsed on every list call, so a malformed setting fails
    /// listing with an internal error instead of being replaced silently.
    pub fn new(default_page_limit: impl Into<String>) -> Self {
        Self {
            default_page_limit: default_page_limit.into(),
            collaborator_timeout: None,
        }
    }

    /// Bound every store and lookup call by `timeout`.
    #[must_use]
    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = Some(timeout);
        self
    }

    /// Raw default page limit.
    pub fn default_page_limit(&self) -> &str {
        &self.default_page_limit
    }

    /// Deadline applied to collaborator calls, if any.
    pub fn collaborator_timeout(&self) -> Option<Duration> {
        self.collaborator_timeout
    }
}

fn map_repository_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::NotFound { id } => {
            Error::not_found(format!("enrollment {id} not found"))
                .with_details(json!({ "entity": "enrollment", "id": id }))
        }
        other => {
            warn!(error = %other, "enrollment store failed");
            Error::internal(other.to_string())
        }
    }
}

fn map_lookup_error(entity: &str, id: &str, error: DirectoryError) -> Error {
    match error {
        DirectoryError::NotFound { .. } => Error::not_found(format!("{entity} {id} not found"))
            .with_details(json!({ "entity": entity, "id": id })),
        other => {
            warn!(entity, id, error = %other, "existence check failed");
            Error::internal(other.to_string())
        }
    }
}

fn map_pagination_error(error: PaginationError) -> Error {
    match error {
        PaginationError::InvalidDefaultLimit { .. } => {
            warn!(error = %error, "pagination settings rejected");
            Error::internal(error.to_string())
                .with_details(json!({ "setting": "pagination_limit_default" }))
        }
        PaginationError::OffsetOverflow { page, limit } => {
            Error::invalid_request(error.to_string())
                .with_details(json!({ "page": page, "limit": limit }))
        }
    }
}

/// Enrollment service implementing both driving ports.
#[derive(Clone)]
pub struct EnrollmentService<R: ?Sized, U: ?Sized, C: ?Sized> {
    repository: Arc<R>,
    users: Arc<U>,
    courses: Arc<C>,
    config: EnrollmentServiceConfig,
}

impl<R: ?Sized, U: ?Sized, C: ?Sized> EnrollmentService<R, U, C> {
    /// Create a service over the given store and existence checks.
    pub fn new(
        repository: Arc<R>,
        users: Arc<U>,
        courses: Arc<C>,
        config: EnrollmentServiceConfig,
    ) -> Self {
        Self {
            repository,
            users,
            courses,
            config,
        }
    }

    /// Await `call`, failing with an internal error naming `collaborator`
    /// once the configured deadline elapses.
    async fn bounded<T, F>(&self, collaborator: &str, call: F) -> Result<T, Error>
    where
        F: Future<Output = T> + Send,
    {
        let Some(limit) = self.config.collaborator_timeout else {
            return Ok(call.await);
        };
        tokio::time::timeout(limit, call).await.map_err(|_| {
            warn!(collaborator, timeout = ?limit, "collaborator timed out");
            Error::internal(format!(
                "{collaborator} did not respond within {}ms",
                limit.as_millis()
            ))
            .with_details(json!({ "collaborator": collaborator }))
        })
    }
}

#[async_trait]
impl<R, U, C> EnrollmentCommand for EnrollmentService<R, U, C>
where
    R: EnrollmentRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: CourseCatalogue + ?Sized,
{
    async fn create_enrollment(
        &self,
        request: CreateEnrollmentRequest,
    ) -> Result<Enrollment, Error> {
        let CreateEnrollmentRequest { user_id, course_id } = request;
        require_non_empty("user_id", &user_id)?;
        require_non_empty("course_id", &course_id)?;
        debug!(%user_id, %course_id, "creating enrollment");

        self.bounded("user service", self.users.get(&user_id))
            .await?
            .map_err(|err| map_lookup_error("user", &user_id, err))?;
        self.bounded("course service", self.courses.get(&course_id))
            .await?
            .map_err(|err| map_lookup_error("course", &course_id, err))?;

        let draft = NewEnrollment::pending(user_id, course_id);
        let enrollment = self
            .bounded("enrollment store", self.repository.create(&draft))
            .await?
            .map_err(map_repository_error)?;
        debug!(id = %enrollment.id(), "enrollment created");
        Ok(enrollment)
    }

    async fn update_status(&self, request: UpdateEnrollmentStatusRequest) -> Result<(), Error> {
        let UpdateEnrollmentStatusRequest { id, status } = request;
        let status = status.as_deref().map(parse_status).transpose()?;
        debug!(%id, status = ?status, "updating enrollment status");

        self.bounded("enrollment store", self.repository.update(&id, status))
            .await?
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R, U, C> EnrollmentQuery for EnrollmentService<R, U, C>
where
    R: EnrollmentRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: CourseCatalogue + ?Sized,
{
    async fn list_enrollments(
        &self,
        request: ListEnrollmentsRequest,
    ) -> Result<ListEnrollmentsResponse, Error> {
        let ListEnrollmentsRequest { filter, page } = request;
        let total = self
            .bounded("enrollment store", self.repository.count(&filter))
            .await?
            .map_err(map_repository_error)?;

        let meta = PageMeta::compute(page, total, &self.config.default_page_limit)
            .map_err(map_pagination_error)?;
        debug!(
            total,
            page = meta.page(),
            limit = meta.limit(),
            "listing enrollments"
        );

        let enrollments = self
            .bounded(
                "enrollment store",
                self.repository.list(&filter, meta.offset(), meta.limit()),
            )
            .await?
            .map_err(map_repository_error)?;

        Ok(ListEnrollmentsResponse { enrollments, meta })
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
