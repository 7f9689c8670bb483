//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

use crate::inbound::http::enrollments::{
    EnrollmentBody, PageMetaBody, UpdateEnrollmentResponseBody,
};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A referenced user, course or enrollment does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A collaborator failed or the service is misconfigured.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user_id is required")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending field, value or entity.
    details: Option<serde_json::Value>,
}

/// Success envelope around a single enrollment.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnrollmentEnvelopeSchema {
    /// HTTP status code.
    #[schema(example = 201)]
    status: u16,
    /// Always `success`.
    #[schema(example = "success")]
    message: String,
    /// Created enrollment.
    data: EnrollmentBody,
}

/// Success envelope around one page of enrollments.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnrollmentListEnvelopeSchema {
    /// HTTP status code.
    #[schema(example = 200)]
    status: u16,
    /// Always `success`.
    #[schema(example = "success")]
    message: String,
    /// Enrollments on this page, most recent first.
    data: Vec<EnrollmentBody>,
    /// Effective window and total.
    meta: PageMetaBody,
}

/// Success envelope around an accepted status update.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnrollmentUpdateEnvelopeSchema {
    /// HTTP status code.
    #[schema(example = 200)]
    status: u16,
    /// Always `success`.
    #[schema(example = "success")]
    message: String,
    /// Echo of the request.
    data: UpdateEnrollmentResponseBody,
}
