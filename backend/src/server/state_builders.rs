//! Builders for the enrollment ports behind the HTTP state.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use tracing::{info, warn};

use enrollments::domain::EnrollmentService;
use enrollments::domain::ports::{
    CourseCatalogue, EnrollmentRepository, FixtureCourseCatalogue, FixtureEnrollmentRepository,
    FixtureUserDirectory, UserDirectory,
};
use enrollments::inbound::http::state::HttpState;
use enrollments::outbound::directory::{HttpCourseCatalogue, HttpUserDirectory};
use enrollments::outbound::persistence::DieselEnrollmentRepository;

use super::ServerConfig;

const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether accepted writes reach a durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persistence {
    Durable,
    Discarded,
}

fn build_repository(config: &ServerConfig) -> (Arc<dyn EnrollmentRepository>, Persistence) {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselEnrollmentRepository::new(pool.clone())),
            Persistence::Durable,
        ),
        None => {
            warn!("no database configured; accepted enrollments are discarded");
            (Arc::new(FixtureEnrollmentRepository), Persistence::Discarded)
        }
    }
}

fn client_setup_error(entity: &str, err: reqwest::Error) -> std::io::Error {
    std::io::Error::other(format!("{entity} client setup failed: {err}"))
}

fn build_users(config: &ServerConfig, timeout: Duration) -> std::io::Result<Arc<dyn UserDirectory>> {
    match &config.user_service_url {
        Some(base) => HttpUserDirectory::new(base.clone(), timeout)
            .map(|adapter| Arc::new(adapter) as Arc<dyn UserDirectory>)
            .map_err(|err| client_setup_error("user", err)),
        None => {
            info!("no user service configured; every user is accepted");
            Ok(Arc::new(FixtureUserDirectory))
        }
    }
}

fn build_courses(
    config: &ServerConfig,
    timeout: Duration,
) -> std::io::Result<Arc<dyn CourseCatalogue>> {
    match &config.course_service_url {
        Some(base) => HttpCourseCatalogue::new(base.clone(), timeout)
            .map(|adapter| Arc::new(adapter) as Arc<dyn CourseCatalogue>)
            .map_err(|err| client_setup_error("course", err)),
        None => {
            info!("no course service configured; every course is accepted");
            Ok(Arc::new(FixtureCourseCatalogue))
        }
    }
}

/// Assemble the HTTP state from the configured adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when an HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (repository, persistence) = build_repository(config);
    info!(?persistence, "enrollment store ready");
    let timeout = config
        .service
        .collaborator_timeout()
        .unwrap_or(DEFAULT_CLIENT_TIMEOUT);
    let users = build_users(config, timeout)?;
    let courses = build_courses(config, timeout)?;

    let service = Arc::new(EnrollmentService::new(
        repository,
        users,
        courses,
        config.service.clone(),
    ));
    Ok(web::Data::new(HttpState::from_service(service)))
}
