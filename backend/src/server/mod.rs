//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

#[cfg(feature = "metrics")]
pub(crate) use metrics::build_prometheus;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use enrollments::Trace;
#[cfg(debug_assertions)]
use enrollments::doc::ApiDoc;
use enrollments::inbound::http::enrollments as enrollment_routes;
use enrollments::inbound::http::health::{HealthState, live, ready};
use enrollments::inbound::http::json_config;
use enrollments::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .configure(enrollment_routes::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] naming the listener, store and
///   remote services.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when a client cannot be built, or binding the
/// socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use enrollments::domain::EnrollmentServiceConfig;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn fixture_state() -> web::Data<HttpState> {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket address"),
            EnrollmentServiceConfig::default(),
        );
        build_http_state(&config).expect("fixture state builds")
    }

    #[rstest]
    #[actix_web::test]
    async fn fixture_wiring_accepts_and_lists() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(build_app(health, fixture_state())).await;

        let created = test::TestRequest::post()
            .uri("/enrollments")
            .set_json(json!({ "user_id": "u-1", "course_id": "c-1" }))
            .send_request(&app)
            .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(created).await;
        assert_eq!(body["data"]["status"], json!("P"));

        let listed = test::TestRequest::get()
            .uri("/enrollments")
            .send_request(&app)
            .await;
        assert_eq!(listed.status(), StatusCode::OK);
        let body: Value = test::read_body_json(listed).await;
        assert_eq!(body["meta"]["total"], json!(0));
        assert_eq!(body["meta"]["limit"], json!(10));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_health_state() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(build_app(health.clone(), fixture_state())).await;

        let before = test::TestRequest::get()
            .uri("/health/ready")
            .send_request(&app)
            .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let after = test::TestRequest::get()
            .uri("/health/ready")
            .send_request(&app)
            .await;
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_uses_error_payload() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(build_app(health, fixture_state())).await;

        let response = test::TestRequest::post()
            .uri("/enrollments")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .send_request(&app)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|m| m.starts_with("invalid request format"))
        );
    }
}
