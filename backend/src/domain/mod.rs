//! Domain primitives, ports and services.
//!
//! Purpose: Define the enrollment aggregate, the structured error returned by
//! every driving port, and the service implementing those ports. Nothing in
//! this module depends on Actix, Diesel or reqwest.
//!
//! Public surface:
//! - Error (alias to `error::Error`): structured failure with a kind tag.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Enrollment, EnrollmentStatus, EnrollmentFilter: enrollment model.
//! - EnrollmentService: implementation of the driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod enrollment;
mod enrollment_service;
pub mod error;
pub mod ports;
mod trace_id;
pub mod validation;

pub use self::enrollment::{
    Enrollment, EnrollmentFilter, EnrollmentId, EnrollmentRecord, EnrollmentStatus,
    InvalidEnrollmentStatus, NewEnrollment,
};
pub use self::enrollment_service::{
    DEFAULT_PAGE_LIMIT, EnrollmentService, EnrollmentServiceConfig,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
