//! Reqwest-backed user and course directory adapters.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into remote records. A 404 from the
//! remote service is the only response treated as "does not exist".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{BodyDto, CourseDto, UserDto};
use crate::domain::ports::{
    CourseCatalogue, DirectoryError, RemoteCourse, RemoteUser, UserDirectory,
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// GET-by-id client for one remote service.
#[derive(Debug, Clone)]
struct DirectoryClient {
    client: Client,
    base: Url,
    entity: &'static str,
    collection: &'static str,
}

impl DirectoryClient {
    fn new(
        base: Url,
        timeout: Duration,
        entity: &'static str,
        collection: &'static str,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            entity,
            collection,
        })
    }

    fn record_url(&self, id: &str) -> Result<Url, DirectoryError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| DirectoryError::transport(format!("{} is not a base URL", self.base)))?
            .pop_if_empty()
            .push(self.collection)
            .push(id);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, id: &str) -> Result<T, DirectoryError> {
        let url = self.record_url(id)?;
        debug!(entity = self.entity, %url, "checking remote record");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::not_found(format!(
                "{} {id} not found",
                self.entity
            )));
        }
        if !status.is_success() {
            return Err(DirectoryError::status(status.as_u16(), body_preview(&body)));
        }

        serde_json::from_slice::<BodyDto<T>>(&body)
            .map(BodyDto::into_inner)
            .map_err(|err| DirectoryError::decode(format!("invalid {} payload: {err}", self.entity)))
    }
}

fn map_transport_error(error: reqwest::Error) -> DirectoryError {
    DirectoryError::transport(error.to_string())
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", trimmed.get(..cut).unwrap_or(trimmed)),
        None => trimmed.to_owned(),
    }
}

/// User directory backed by `GET {base}/users/{id}`.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    inner: DirectoryClient,
}

impl HttpUserDirectory {
    /// Build an adapter for the user service at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            inner: DirectoryClient::new(base, timeout, "user", "users")?,
        })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get(&self, id: &str) -> Result<RemoteUser, DirectoryError> {
        self.inner.fetch::<UserDto>(id).await.map(RemoteUser::from)
    }
}

/// Course catalogue backed by `GET {base}/courses/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCourseCatalogue {
    inner: DirectoryClient,
}

impl HttpCourseCatalogue {
    /// Build an adapter for the course service at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            inner: DirectoryClient::new(base, timeout, "course", "courses")?,
        })
    }
}

#[async_trait]
impl CourseCatalogue for HttpCourseCatalogue {
    async fn get(&self, id: &str) -> Result<RemoteCourse, DirectoryError> {
        self.inner.fetch::<CourseDto>(id).await.map(RemoteCourse::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn base(server: &MockServer) -> Url {
        Url::parse(&server.base_url()).expect("mock server URL parses")
    }

    #[tokio::test]
    async fn decodes_enveloped_user() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/u-1");
                then.status(200).json_body(json!({
                    "status": 200,
                    "message": "success",
                    "data": { "id": "u-1", "email": "ada@example.test" },
                }));
            })
            .await;

        let directory =
            HttpUserDirectory::new(base(&server), Duration::from_secs(2)).expect("client builds");
        let user = directory.get("u-1").await.expect("user exists");

        mock.assert_async().await;
        assert_eq!(user.id, "u-1");
        assert_eq!(user.email.as_deref(), Some("ada@example.test"));
    }

    #[tokio::test]
    async fn decodes_bare_course_under_base_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/courses/c-1");
                then.status(200).json_body(json!({ "id": "c-1", "name": "Rust" }));
            })
            .await;

        let url = Url::parse(&server.url("/api/")).expect("URL parses");
        let catalogue = HttpCourseCatalogue::new(url, Duration::from_secs(2)).expect("client builds");
        let course = catalogue.get("c-1").await.expect("course exists");

        mock.assert_async().await;
        assert_eq!(course.name.as_deref(), Some("Rust"));
    }

    #[rstest]
    #[case(404, "not_found")]
    #[case(500, "status")]
    #[case(503, "status")]
    #[tokio::test]
    async fn maps_http_statuses(#[case] code: u16, #[case] expected: &str) {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/u-9");
                then.status(code).body("upstream says no");
            })
            .await;

        let directory =
            HttpUserDirectory::new(base(&server), Duration::from_secs(2)).expect("client builds");
        let err = directory.get("u-9").await.expect_err("lookup fails");

        match (expected, &err) {
            ("not_found", DirectoryError::NotFound { message }) => {
                assert_eq!(message, "user u-9 not found");
            }
            ("status", DirectoryError::Status { status, message }) => {
                assert_eq!(*status, code);
                assert_eq!(message, "upstream says no");
            }
            _ => panic!("unexpected mapping for {code}: {err:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/courses/c-1");
                then.status(200).body("not json");
            })
            .await;

        let catalogue =
            HttpCourseCatalogue::new(base(&server), Duration::from_secs(2)).expect("client builds");
        let err = catalogue.get("c-1").await.expect_err("decode fails");
        assert!(matches!(err, DirectoryError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let url = Url::parse("http://127.0.0.1:9").expect("URL parses");
        let directory = HttpUserDirectory::new(url, Duration::from_millis(500)).expect("client builds");
        let err = directory.get("u-1").await.expect_err("connection fails");
        assert!(matches!(err, DirectoryError::Transport { .. }));
    }

    #[rstest]
    fn identifiers_are_path_encoded() {
        let client = DirectoryClient::new(
            Url::parse("http://users.local/v1").expect("URL parses"),
            Duration::from_secs(1),
            "user",
            "users",
        )
        .expect("client builds");
        let url = client.record_url("a/b c").expect("URL builds");
        assert_eq!(url.as_str(), "http://users.local/v1/users/a%2Fb%20c");
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), BODY_PREVIEW_LIMIT + 3);
    }
}
