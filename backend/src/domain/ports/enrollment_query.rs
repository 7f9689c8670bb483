//! Driving port for enrollment reads.

use async_trait::async_trait;
use pagination::{PageMeta, PageRequest};

use crate::domain::{Enrollment, EnrollmentFilter, Error};

/// Request for one page of enrollments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEnrollmentsRequest {
    /// Conjunctive user/course constraints.
    pub filter: EnrollmentFilter,
    /// Raw, unclamped page and limit values.
    pub page: PageRequest,
}

/// One page of enrollments plus its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEnrollmentsResponse {
    /// Matching enrollments, most recent first.
    pub enrollments: Vec<Enrollment>,
    /// Effective page, limit, total and offset.
    pub meta: PageMeta,
}

/// Driving port for enrollment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// List matching enrollments for the requested window.
    ///
    /// Out-of-range page and limit values are clamped rather than rejected.
    async fn list_enrollments(
        &self,
        request: ListEnrollmentsRequest,
    ) -> Result<ListEnrollmentsResponse, Error>;
}
