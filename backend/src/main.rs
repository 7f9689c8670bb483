//! Enrollment service entry-point: loads settings, prepares storage and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use enrollments::inbound::http::health::HealthState;
use enrollments::outbound::persistence::{DbPool, PoolConfig, run_migrations};
#[cfg(feature = "metrics")]
use server::build_prometheus;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %settings.bind_addr(), "starting enrollment service");
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server stopped with an error")
}

async fn build_server_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr(), settings.service_config())
        .with_directories(settings.user_service_url()?, settings.course_service_url()?);

    let config = match settings.database_url.as_deref() {
        Some(url) => {
            run_migrations(url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
                .await
                .wrap_err("failed to build database pool")?;
            config.with_db_pool(pool)
        }
        None => config,
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(
        build_prometheus().wrap_err("failed to register Prometheus metrics")?,
    ));

    Ok(config)
}
