//! End-to-end behaviour of the enrollment endpoints over in-memory adapters.
//!
//! The full Actix application is assembled from the library: trace middleware,
//! JSON error handling, the enrollment service, a process-local store and
//! directories that recognise a fixed set of users and courses.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use enrollments::Trace;
use enrollments::domain::ports::{CourseCatalogue, UserDirectory};
use enrollments::domain::{EnrollmentService, EnrollmentServiceConfig, TRACE_ID_HEADER};
use enrollments::inbound::http::enrollments::configure;
use enrollments::inbound::http::json_config;
use enrollments::inbound::http::state::HttpState;
use enrollments::test_support::{
    InMemoryEnrollmentRepository, StaticCourseCatalogue, StaticUserDirectory,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

/// Clock pinned to a single instant so creation timestamps tie.
struct FrozenClock(DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

struct Harness {
    store: Arc<InMemoryEnrollmentRepository>,
    users: Arc<dyn UserDirectory>,
    courses: Arc<dyn CourseCatalogue>,
    config: EnrollmentServiceConfig,
}

impl Harness {
    fn with_users(mut self, users: StaticUserDirectory) -> Self {
        self.users = Arc::new(users);
        self
    }

    fn with_store(mut self, store: InMemoryEnrollmentRepository) -> Self {
        self.store = Arc::new(store);
        self
    }

    fn with_config(mut self, config: EnrollmentServiceConfig) -> Self {
        self.config = config;
        self
    }

    async fn app(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        let service = Arc::new(EnrollmentService::new(
            self.store,
            self.users,
            self.courses,
            self.config,
        ));
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::from_service(service)))
                .app_data(json_config())
                .wrap(Trace)
                .configure(configure),
        )
        .await
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        store: Arc::new(InMemoryEnrollmentRepository::new()),
        users: Arc::new(StaticUserDirectory::new(["u-1", "u-2"])),
        courses: Arc::new(StaticCourseCatalogue::new(["c-1", "c-2"])),
        config: EnrollmentServiceConfig::default(),
    }
}

async fn read_json(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

async fn create<S>(app: &S, user_id: &str, course_id: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/enrollments")
        .set_json(json!({ "user_id": user_id, "course_id": course_id }))
        .to_request();
    read_json(test::call_service(app, request).await).await
}

async fn get<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::get().uri(uri).to_request();
    read_json(test::call_service(app, request).await).await
}

async fn patch<S>(app: &S, id: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::patch()
        .uri(&format!("/enrollments/{id}"))
        .set_json(body)
        .to_request();
    read_json(test::call_service(app, request).await).await
}

#[rstest]
#[actix_web::test]
async fn created_enrollment_is_pending_and_listed(harness: Harness) {
    let app = harness.app().await;

    let (status, body) = create(&app, "u-1", "c-1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!(201));
    assert_eq!(body["message"], json!("success"));
    assert_eq!(body["data"]["status"], json!("P"));
    let id = body["data"]["id"].as_str().expect("id").to_owned();

    let (status, body) = get(&app, "/enrollments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], json!(id));
    assert_eq!(
        body["meta"],
        json!({ "page": 1, "limit": 10, "total": 1, "offset": 0 })
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_user_is_not_found_and_nothing_is_stored(harness: Harness) {
    let store = harness.store.clone();
    let app = harness.app().await;

    let (status, body) = create(&app, "u-404", "c-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!("user u-404 not found"));
    assert!(store.snapshot().expect("store readable").is_empty());
}

#[rstest]
#[actix_web::test]
async fn unknown_course_is_not_found(harness: Harness) {
    let app = harness.app().await;

    let (status, body) = create(&app, "u-1", "c-404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("course c-404 not found"));
}

#[rstest]
#[actix_web::test]
async fn user_service_outage_is_internal(harness: Harness) {
    let app = harness
        .with_users(StaticUserDirectory::unavailable("connection refused"))
        .app()
        .await;

    let (status, body) = create(&app, "u-1", "c-1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], json!("internal_error"));
    assert_eq!(
        body["message"],
        json!("directory request failed: connection refused")
    );
    assert!(body["traceId"].is_string());
}

#[rstest]
#[case(json!({ "course_id": "c-1" }), "user_id is required")]
#[case(json!({ "user_id": "", "course_id": "c-1" }), "user_id is required")]
#[case(json!({ "user_id": "u-1" }), "course_id is required")]
#[actix_web::test]
async fn missing_identifiers_are_rejected(
    harness: Harness,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = harness.app().await;
    let request = test::TestRequest::post()
        .uri("/enrollments")
        .set_json(payload)
        .to_request();
    let (status, body) = read_json(test::call_service(&app, request).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!(message));
}

#[rstest]
#[actix_web::test]
async fn listing_filters_and_pages_most_recent_first(harness: Harness) {
    let app = harness.app().await;
    let mut created = Vec::new();
    for (user, course) in [("u-1", "c-1"), ("u-1", "c-2"), ("u-2", "c-1"), ("u-1", "c-1")] {
        let (status, body) = create(&app, user, course).await;
        assert_eq!(status, StatusCode::CREATED);
        created.push(body["data"]["id"].as_str().expect("id").to_owned());
    }

    let (_, body) = get(&app, "/enrollments?user_id=u-1&course_id=c-1").await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|row| row["id"].as_str())
        .collect();
    assert_eq!(ids, [created[3].as_str(), created[0].as_str()]);
    assert_eq!(body["meta"]["total"], json!(2));

    let (_, body) = get(&app, "/enrollments?user_id=u-1&limit=2&page=2").await;
    assert_eq!(
        body["meta"],
        json!({ "page": 2, "limit": 2, "total": 3, "offset": 2 })
    );
    assert_eq!(body["data"][0]["id"], json!(created[0]));

    let (_, body) = get(&app, "/enrollments?page=9").await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total"], json!(4));
}

#[rstest]
#[actix_web::test]
async fn equal_timestamps_order_by_identifier_descending(harness: Harness) {
    let instant = Utc
        .with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let app = harness
        .with_store(InMemoryEnrollmentRepository::with_clock(Arc::new(
            FrozenClock(instant),
        )))
        .app()
        .await;

    let (_, first) = create(&app, "u-1", "c-1").await;
    let (_, second) = create(&app, "u-2", "c-2").await;

    let (_, body) = get(&app, "/enrollments").await;
    assert_eq!(body["data"][0]["id"], second["data"]["id"]);
    assert_eq!(body["data"][1]["id"], first["data"]["id"]);
    assert_eq!(body["data"][0]["created_at"], json!("2026-01-05T12:00:00+00:00"));
}

#[rstest]
#[actix_web::test]
async fn non_numeric_window_parameters_fall_back(harness: Harness) {
    let app = harness.app().await;
    let (status, body) = get(&app, "/enrollments?limit=lots&page=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], json!(1));
    assert_eq!(body["meta"]["limit"], json!(10));
}

#[rstest]
#[actix_web::test]
async fn malformed_default_limit_fails_listing(harness: Harness) {
    let app = harness
        .with_config(EnrollmentServiceConfig::new("not-a-number"))
        .app()
        .await;

    let (status, body) = get(&app, "/enrollments?limit=5").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"]["setting"], json!("pagination_limit_default"));
}

#[rstest]
#[actix_web::test]
async fn status_updates_are_stored_and_idempotent(harness: Harness) {
    let store = harness.store.clone();
    let app = harness.app().await;
    let (_, body) = create(&app, "u-1", "c-1").await;
    let id = body["data"]["id"].as_str().expect("id").to_owned();

    for _ in 0..2 {
        let (status, body) = patch(&app, &id, json!({ "status": "A" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({ "id": id, "status": "A" }));
    }

    let stored = store.snapshot().expect("store readable");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status().code(), "A");

    let (_, body) = get(&app, "/enrollments").await;
    assert_eq!(body["data"][0]["status"], json!("A"));
}

#[rstest]
#[case(json!({ "status": "ACT" }), "status must be at most 2 characters")]
#[case(json!({ "status": "X" }), "invalid status: X")]
#[case(json!({}), "status is required")]
#[actix_web::test]
async fn invalid_status_leaves_enrollment_untouched(
    harness: Harness,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let store = harness.store.clone();
    let app = harness.app().await;
    let (_, body) = create(&app, "u-1", "c-1").await;
    let id = body["data"]["id"].as_str().expect("id").to_owned();

    let (status, body) = patch(&app, &id, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!(message));

    let stored = store.snapshot().expect("store readable");
    assert_eq!(stored[0].status().code(), "P");
}

#[rstest]
#[actix_web::test]
async fn updating_unknown_enrollment_is_not_found(harness: Harness) {
    let app = harness.app().await;
    let (status, body) = patch(&app, "missing", json!({ "status": "I" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("enrollment missing not found"));
    assert_eq!(body["details"]["id"], json!("missing"));
}

#[rstest]
#[actix_web::test]
async fn responses_echo_inbound_trace_id(harness: Harness) {
    let app = harness.app().await;
    let trace_id = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let request = test::TestRequest::patch()
        .uri("/enrollments/missing")
        .insert_header((TRACE_ID_HEADER, trace_id))
        .set_json(json!({ "status": "A" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(trace_id));
    let (_, body) = read_json(response).await;
    assert_eq!(body["traceId"], json!(trace_id));
}
