//! Enrollment aggregate and supporting value types.
//!
//! An enrollment links a remote user to a remote course and tracks a
//! lifecycle [`EnrollmentStatus`]. Identifiers of users and courses are owned
//! by other services, so they are kept as opaque strings here; the
//! enrollment's own identifier is assigned by the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Store-assigned enrollment identifier.
///
/// The value is opaque to the domain: adapters decide its format and report
/// unknown or malformed identifiers as not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnrollmentId(String);

impl EnrollmentId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EnrollmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status of an enrollment.
///
/// Each status has a short wire and storage code. Any status may move to any
/// other; only membership in this set is enforced.
///
/// # Examples
/// ```
/// use enrollments::domain::EnrollmentStatus;
///
/// let status: EnrollmentStatus = "S".parse().expect("known code");
/// assert_eq!(status, EnrollmentStatus::Studying);
/// assert_eq!(status.code(), "S");
/// assert!("X".parse::<EnrollmentStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnrollmentStatus {
    /// Initial status of every new enrollment.
    #[default]
    Pending,
    /// Enrollment confirmed.
    Active,
    /// User is working through the course.
    Studying,
    /// Enrollment no longer in effect.
    Inactive,
}

impl EnrollmentStatus {
    /// Every known status, in declaration order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Active, Self::Studying, Self::Inactive];

    /// Short code used on the wire and in storage.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::Active => "A",
            Self::Studying => "S",
            Self::Inactive => "I",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised when a status code is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {value}")]
pub struct InvalidEnrollmentStatus {
    /// Offending raw value.
    pub value: String,
}

impl FromStr for EnrollmentStatus {
    type Err = InvalidEnrollmentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| InvalidEnrollmentStatus {
                value: s.to_owned(),
            })
    }
}

/// Persisted enrollment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    id: EnrollmentId,
    user_id: String,
    course_id: String,
    status: EnrollmentStatus,
    created_at: DateTime<Utc>,
}

/// Field bundle used to rebuild an [`Enrollment`] from storage.
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    /// Store-assigned identifier.
    pub id: EnrollmentId,
    /// Referenced user.
    pub user_id: String,
    /// Referenced course.
    pub course_id: String,
    /// Current status.
    pub status: EnrollmentStatus,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

impl From<EnrollmentRecord> for Enrollment {
    fn from(record: EnrollmentRecord) -> Self {
        let EnrollmentRecord {
            id,
            user_id,
            course_id,
            status,
            created_at,
        } = record;
        Self {
            id,
            user_id,
            course_id,
            status,
            created_at,
        }
    }
}

impl Enrollment {
    /// Store-assigned identifier.
    pub fn id(&self) -> &EnrollmentId {
        &self.id
    }

    /// Referenced user identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Referenced course identifier.
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Current lifecycle status.
    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Draft handed to the store on creation.
///
/// Only [`NewEnrollment::pending`] constructs one, so every stored enrollment
/// starts as [`EnrollmentStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    user_id: String,
    course_id: String,
    status: EnrollmentStatus,
}

impl NewEnrollment {
    /// Draft a pending enrollment for the given user and course.
    pub fn pending(user_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            course_id: course_id.into(),
            status: EnrollmentStatus::Pending,
        }
    }

    /// Referenced user identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Referenced course identifier.
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Initial status.
    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    /// Complete the draft with store-assigned fields.
    pub fn into_enrollment(self, id: EnrollmentId, created_at: DateTime<Utc>) -> Enrollment {
        Enrollment {
            id,
            user_id: self.user_id,
            course_id: self.course_id,
            status: self.status,
            created_at,
        }
    }
}

/// Conjunctive filter over user and course identifiers.
///
/// Empty strings are normalised to "no constraint" on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentFilter {
    user_id: Option<String>,
    course_id: Option<String>,
}

impl EnrollmentFilter {
    /// Build a filter; `None` and empty strings leave the field unconstrained.
    ///
    /// # Examples
    /// ```
    /// use enrollments::domain::EnrollmentFilter;
    ///
    /// let filter = EnrollmentFilter::new(Some("u-1".to_owned()), Some(String::new()));
    /// assert_eq!(filter.user_id(), Some("u-1"));
    /// assert_eq!(filter.course_id(), None);
    /// ```
    pub fn new(user_id: Option<String>, course_id: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.is_empty()),
            course_id: course_id.filter(|id| !id.is_empty()),
        }
    }

    /// User constraint, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Course constraint, if any.
    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    /// True when `enrollment` satisfies every present constraint.
    pub fn matches(&self, enrollment: &Enrollment) -> bool {
        self.user_id().is_none_or(|id| id == enrollment.user_id())
            && self.course_id().is_none_or(|id| id == enrollment.course_id())
    }
}
