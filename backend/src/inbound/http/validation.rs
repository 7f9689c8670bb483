//! Shape validation for inbound HTTP payloads.
//!
//! These checks run before any port is called. Messages and details match
//! the domain validators so clients see one vocabulary whichever layer
//! rejected the request.

use crate::domain::Error;
use crate::domain::validation::{check_status_length, require_non_empty};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Require a present, non-empty field; absent and empty are reported alike.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let value = value.unwrap_or_default();
    require_non_empty(field.as_str(), &value)?;
    Ok(value)
}

/// Require a present, non-empty status of at most two characters.
///
/// Membership in the known status set is checked by the domain service.
pub(crate) fn require_status_shape(status: Option<String>) -> Result<String, Error> {
    let status = require_field(status, FieldName::new("status"))?;
    check_status_length(&status)?;
    Ok(status)
}

/// Parse an optional page or limit query value.
///
/// Missing, non-numeric and negative values all mean "not provided" and map
/// to zero so the pagination calculator applies its defaults.
pub(crate) fn lenient_window_param(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(0)
}
