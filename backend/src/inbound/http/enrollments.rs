//! Enrollment HTTP handlers.
//!
//! ```text
//! POST  /enrollments
//! GET   /enrollments?user_id=&course_id=&page=&limit=
//! PATCH /enrollments/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, patch, post, web};
use pagination::{PageMeta, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateEnrollmentRequest, ListEnrollmentsRequest, UpdateEnrollmentStatusRequest,
};
use crate::domain::{Enrollment, EnrollmentFilter, EnrollmentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ResponseEnvelope;
use crate::inbound::http::schemas::{
    EnrollmentEnvelopeSchema, EnrollmentListEnvelopeSchema, EnrollmentUpdateEnvelopeSchema,
    ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, lenient_window_param, require_field, require_status_shape,
};

/// Request payload for enrolling a user in a course.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateEnrollmentRequestBody {
    /// Identifier of the user to enroll.
    #[schema(example = "user-123")]
    pub user_id: Option<String>,
    /// Identifier of the course to enroll in.
    #[schema(example = "course-456")]
    pub course_id: Option<String>,
}

/// Request payload for changing an enrollment's status.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateEnrollmentRequestBody {
    /// New status code: `P`, `A`, `S` or `I`.
    #[schema(example = "A", max_length = 2)]
    pub status: Option<String>,
}

/// Query parameters accepted by the list endpoint.
///
/// `page` and `limit` stay textual so malformed numbers fall back to the
/// defaults instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEnrollmentsQuery {
    /// Only return enrollments for this user.
    pub user_id: Option<String>,
    /// Only return enrollments for this course.
    pub course_id: Option<String>,
    /// Page size; defaults to the configured limit.
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// 1-based page number; defaults to 1.
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

/// Enrollment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct EnrollmentBody {
    /// Store-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Enrolled user.
    pub user_id: String,
    /// Course enrolled in.
    pub course_id: String,
    /// Status code.
    #[schema(example = "P")]
    pub status: String,
    /// Creation timestamp.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Enrollment> for EnrollmentBody {
    fn from(value: Enrollment) -> Self {
        Self {
            id: value.id().to_string(),
            user_id: value.user_id().to_owned(),
            course_id: value.course_id().to_owned(),
            status: value.status().code().to_owned(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// Pagination metadata returned with a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PageMetaBody {
    /// Effective page number.
    pub page: u64,
    /// Effective page size.
    pub limit: u64,
    /// Number of matching enrollments.
    pub total: u64,
    /// Records skipped before this page.
    pub offset: u64,
}

impl From<PageMeta> for PageMetaBody {
    fn from(value: PageMeta) -> Self {
        Self {
            page: value.page(),
            limit: value.limit(),
            total: value.total(),
            offset: value.offset(),
        }
    }
}

/// Echo of an accepted status update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UpdateEnrollmentResponseBody {
    /// Updated enrollment.
    pub id: String,
    /// Status as submitted.
    pub status: String,
}

/// Enroll a user in a course.
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = CreateEnrollmentRequestBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentEnvelopeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User or course not found", body = ErrorSchema),
        (status = 500, description = "Upstream or storage failure", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "createEnrollment"
)]
#[post("/enrollments")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEnrollmentRequestBody>,
) -> ApiResult<HttpResponse> {
    let CreateEnrollmentRequestBody { user_id, course_id } = payload.into_inner();
    let user_id = require_field(user_id, FieldName::new("user_id"))?;
    let course_id = require_field(course_id, FieldName::new("course_id"))?;

    let enrollment = state
        .enrollments
        .create_enrollment(CreateEnrollmentRequest { user_id, course_id })
        .await?;

    Ok(ResponseEnvelope::new(StatusCode::CREATED, EnrollmentBody::from(enrollment)).into_response())
}

/// List enrollments, optionally filtered by user and course.
#[utoipa::path(
    get,
    path = "/enrollments",
    params(ListEnrollmentsQuery),
    responses(
        (status = 200, description = "Page of enrollments", body = EnrollmentListEnvelopeSchema),
        (status = 500, description = "Storage failure or misconfiguration", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
    query: web::Query<ListEnrollmentsQuery>,
) -> ApiResult<HttpResponse> {
    let ListEnrollmentsQuery {
        user_id,
        course_id,
        limit,
        page,
    } = query.into_inner();
    let request = ListEnrollmentsRequest {
        filter: EnrollmentFilter::new(user_id, course_id),
        page: PageRequest::new(
            lenient_window_param(page.as_deref()),
            lenient_window_param(limit.as_deref()),
        ),
    };

    let response = state.enrollments_query.list_enrollments(request).await?;
    let data: Vec<EnrollmentBody> = response
        .enrollments
        .into_iter()
        .map(EnrollmentBody::from)
        .collect();

    Ok(ResponseEnvelope::new(StatusCode::OK, data)
        .with_meta(PageMetaBody::from(response.meta))
        .into_response())
}

/// Change the status of an enrollment.
#[utoipa::path(
    patch,
    path = "/enrollments/{id}",
    params(("id" = String, Path, description = "Enrollment identifier")),
    request_body = UpdateEnrollmentRequestBody,
    responses(
        (status = 200, description = "Status updated", body = EnrollmentUpdateEnvelopeSchema),
        (status = 400, description = "Invalid status", body = ErrorSchema),
        (status = 404, description = "Enrollment not found", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "updateEnrollment"
)]
#[patch("/enrollments/{id}")]
pub async fn update_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEnrollmentRequestBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let status = require_status_shape(payload.into_inner().status)?;

    state
        .enrollments
        .update_status(UpdateEnrollmentStatusRequest {
            id: EnrollmentId::new(id.clone()),
            status: Some(status.clone()),
        })
        .await?;

    Ok(
        ResponseEnvelope::new(StatusCode::OK, UpdateEnrollmentResponseBody { id, status })
            .into_response(),
    )
}

/// Register every enrollment endpoint on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_enrollment)
        .service(list_enrollments)
        .service(update_enrollment);
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
