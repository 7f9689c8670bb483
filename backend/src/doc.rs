//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the enrollment and health endpoints plus the schema
//! wrappers from `inbound::http::schemas`, keeping domain types free of
//! utoipa derives. The document backs Swagger UI in debug builds.

use crate::inbound::http::enrollments::{
    CreateEnrollmentRequestBody, EnrollmentBody, PageMetaBody, UpdateEnrollmentRequestBody,
    UpdateEnrollmentResponseBody,
};
use crate::inbound::http::schemas::{
    EnrollmentEnvelopeSchema, EnrollmentListEnvelopeSchema, EnrollmentUpdateEnvelopeSchema,
    ErrorCodeSchema, ErrorSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Enrollment service API",
        description = "Create, list and update enrollments linking users to courses."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::enrollments::create_enrollment,
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::update_enrollment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateEnrollmentRequestBody,
        UpdateEnrollmentRequestBody,
        EnrollmentBody,
        PageMetaBody,
        UpdateEnrollmentResponseBody,
        EnrollmentEnvelopeSchema,
        EnrollmentListEnvelopeSchema,
        EnrollmentUpdateEnvelopeSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "enrollments", description = "Enrollment lifecycle operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
