//! Field validation shared by the enrollment service and inbound adapters.
//!
//! Both layers report the same messages and details so a request rejected by
//! the HTTP adapter is indistinguishable from one rejected by the service.

use serde_json::json;

use super::{EnrollmentStatus, Error};

/// Longest status code accepted on the wire.
pub const MAX_STATUS_LEN: usize = 2;

/// Reject an empty required field with `"<field> is required"`.
///
/// # Errors
///
/// Returns [`Error::invalid_request`] when `value` is empty.
///
/// # Examples
/// ```
/// use enrollments::domain::validation::require_non_empty;
///
/// assert!(require_non_empty("user_id", "u-1").is_ok());
/// let err = require_non_empty("user_id", "").expect_err("empty");
/// assert_eq!(err.message(), "user_id is required");
/// ```
pub fn require_non_empty(field: &str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::invalid_request(format!("{field} is required"))
            .with_details(json!({ "field": field, "code": "missing_field" })));
    }
    Ok(())
}

/// Reject a status longer than [`MAX_STATUS_LEN`] characters.
///
/// # Errors
///
/// Returns [`Error::invalid_request`] naming the limit.
pub fn check_status_length(raw: &str) -> Result<(), Error> {
    if raw.chars().count() > MAX_STATUS_LEN {
        return Err(Error::invalid_request(format!(
            "status must be at most {MAX_STATUS_LEN} characters"
        ))
        .with_details(json!({
            "field": "status",
            "value": raw,
            "code": "status_too_long",
        })));
    }
    Ok(())
}

/// Parse a status code, reporting unknown values with the offending input.
///
/// # Errors
///
/// Returns [`Error::invalid_request`] with message `invalid status: <raw>`.
///
/// # Examples
/// ```
/// use enrollments::domain::EnrollmentStatus;
/// use enrollments::domain::validation::parse_status;
///
/// assert_eq!(parse_status("A").expect("known"), EnrollmentStatus::Active);
/// assert_eq!(
///     parse_status("Z").expect_err("unknown").message(),
///     "invalid status: Z"
/// );
/// ```
pub fn parse_status(raw: &str) -> Result<EnrollmentStatus, Error> {
    raw.parse::<EnrollmentStatus>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "status",
            "value": err.value,
            "code": "invalid_status",
        }))
    })
}
