//! HTTP server settings and the resolved server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use enrollments::domain::{DEFAULT_PAGE_LIMIT, EnrollmentServiceConfig};
use enrollments::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::{Deserialize, Deserializer};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings loaded from CLI arguments, `ENROLLMENTS_*` variables and config
/// files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ENROLLMENTS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. Without it the server keeps no state.
    pub database_url: Option<String>,
    /// Base URL of the user service.
    pub user_service_url: Option<String>,
    /// Base URL of the course service.
    pub course_service_url: Option<String>,
    /// Page size applied when a list request omits `limit`. Kept as raw
    /// text so a malformed value surfaces when a listing is served.
    #[ortho_config(default = DEFAULT_PAGE_LIMIT.to_owned())]
    #[serde(deserialize_with = "raw_setting")]
    pub pagination_limit_default: String,
    /// Deadline for each user, course and store call.
    pub lookup_timeout_ms: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

/// Failure turning settings into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A service base URL could not be parsed.
    #[error("{setting} is not a valid URL: {source}")]
    InvalidUrl {
        /// Name of the offending setting.
        setting: &'static str,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}

impl ServerSettings {
    /// Listening address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Raw default page limit, defaulting to `"10"`.
    pub fn pagination_limit_default(&self) -> &str {
        &self.pagination_limit_default
    }

    /// Collaborator deadline, defaulting to five seconds.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms.unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS))
    }

    /// Pool size, defaulting to ten connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Parsed user service base URL, if configured.
    pub fn user_service_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("user_service_url", self.user_service_url.as_deref())
    }

    /// Parsed course service base URL, if configured.
    pub fn course_service_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("course_service_url", self.course_service_url.as_deref())
    }

    /// Enrollment service tunables derived from these settings.
    pub fn service_config(&self) -> EnrollmentServiceConfig {
        EnrollmentServiceConfig::new(self.pagination_limit_default())
            .with_collaborator_timeout(self.lookup_timeout())
    }
}

/// Environment values that look numeric arrive as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

fn raw_setting<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawSetting::deserialize(deserializer)? {
        RawSetting::Text(text) => text,
        RawSetting::Unsigned(value) => value.to_string(),
        RawSetting::Signed(value) => value.to_string(),
    })
}

fn parse_url(setting: &'static str, raw: Option<&str>) -> Result<Option<Url>, SettingsError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| Url::parse(value).map_err(|source| SettingsError::InvalidUrl { setting, source }))
        .transpose()
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) user_service_url: Option<Url>,
    pub(crate) course_service_url: Option<Url>,
    pub(crate) service: EnrollmentServiceConfig,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration with no database and no remote services.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, service: EnrollmentServiceConfig) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            user_service_url: None,
            course_service_url: None,
            service,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the enrollment store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Check users and courses against remote services when URLs are given.
    #[must_use]
    pub fn with_directories(mut self, users: Option<Url>, courses: Option<Url>) -> Self {
        self.user_service_url = users;
        self.course_service_url = courses;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
