//! Existence-check ports for the users and courses owned by other services.
//!
//! Enrollment creation only proceeds once both referenced entities are known
//! to exist. Adapters must keep "the entity does not exist" distinguishable
//! from every other failure.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory adapters.
    pub enum DirectoryError {
        /// The remote service reports that the entity does not exist.
        NotFound { message: String } => "{message}",
        /// The request could not be sent or the response could not be read.
        Transport { message: String } => "directory request failed: {message}",
        /// The remote service answered with an unexpected status.
        Status { status: u16, message: String } =>
            "directory responded with status {status}: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } => "directory response could not be decoded: {message}",
    }
}

/// User as reported by the user service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    /// Identifier of the user.
    pub id: String,
    /// Contact address, when the service discloses one.
    pub email: Option<String>,
}

/// Course as reported by the course service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCourse {
    /// Identifier of the course.
    pub id: String,
    /// Human-readable course name, when provided.
    pub name: Option<String>,
}

/// Lookup port for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by identifier.
    async fn get(&self, id: &str) -> Result<RemoteUser, DirectoryError>;
}

/// Lookup port for courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogue: Send + Sync {
    /// Fetch a course by identifier.
    async fn get(&self, id: &str) -> Result<RemoteCourse, DirectoryError>;
}

/// Directory that knows every user. Used when no user service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn get(&self, id: &str) -> Result<RemoteUser, DirectoryError> {
        Ok(RemoteUser {
            id: id.to_owned(),
            email: None,
        })
    }
}

/// Catalogue that knows every course. Used when no course service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCatalogue;

#[async_trait]
impl CourseCatalogue for FixtureCourseCatalogue {
    async fn get(&self, id: &str) -> Result<RemoteCourse, DirectoryError> {
        Ok(RemoteCourse {
            id: id.to_owned(),
            name: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixtures_echo_requested_ids() {
        let user = FixtureUserDirectory.get("u-1").await.expect("user");
        let course = FixtureCourseCatalogue.get("c-1").await.expect("course");
        assert_eq!(user.id, "u-1");
        assert_eq!(course.id, "c-1");
    }

    #[rstest]
    fn status_error_formats_code_and_message() {
        let err = DirectoryError::status(502_u16, "bad gateway");
        assert_eq!(
            err.to_string(),
            "directory responded with status 502: bad gateway"
        );
    }

    #[rstest]
    fn not_found_message_is_passed_through() {
        let err = DirectoryError::not_found("User not found");
        assert_eq!(err.to_string(), "User not found");
    }
}
