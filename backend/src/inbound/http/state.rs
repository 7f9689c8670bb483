//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EnrollmentCommand, EnrollmentQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Enrollment write port.
    pub enrollments: Arc<dyn EnrollmentCommand>,
    /// Enrollment read port.
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
}

impl HttpState {
    /// Construct state from the enrollment ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use enrollments::domain::ports::{
    ///     FixtureCourseCatalogue, FixtureEnrollmentRepository, FixtureUserDirectory,
    /// };
    /// use enrollments::domain::{EnrollmentService, EnrollmentServiceConfig};
    /// use enrollments::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(EnrollmentService::new(
    ///     Arc::new(FixtureEnrollmentRepository),
    ///     Arc::new(FixtureUserDirectory),
    ///     Arc::new(FixtureCourseCatalogue),
    ///     EnrollmentServiceConfig::default(),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.enrollments_query.clone();
    /// ```
    pub fn new(
        enrollments: Arc<dyn EnrollmentCommand>,
        enrollments_query: Arc<dyn EnrollmentQuery>,
    ) -> Self {
        Self {
            enrollments,
            enrollments_query,
        }
    }

    /// Build state from one value implementing both enrollment ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: EnrollmentCommand + EnrollmentQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}
