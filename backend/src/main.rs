//! Backend entry-point: loads configuration, prepares the database and serves
//! the users REST API with health checks and OpenAPI docs.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain_on_signal};
use users_backend::inbound::http::health::HealthState;
use users_backend::outbound::persistence::{DbPool, DieselUserRepository, run_pending_migrations};
use users_backend::settings::{DatabaseSettings, ServerSettings};

const APP_NAME: &str = "users-backend";

/// `RUST_LOG` when set, otherwise `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_tracing() -> Result<()> {
    fmt()
        .with_env_filter(log_filter())
        .json()
        .try_init()
        .map_err(|err| eyre!("failed to initialise tracing: {err}"))
}

fn load_settings() -> Result<(DatabaseSettings, ServerSettings)> {
    let database = DatabaseSettings::load_from_iter([OsString::from(APP_NAME)])
        .map_err(|err| eyre!("failed to load database settings: {err}"))?;
    let server = ServerSettings::load_from_iter([OsString::from(APP_NAME)])
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    Ok((database, server))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Must precede init_tracing: `.env` may set RUST_LOG.
    let dotenv = dotenvy::dotenv();
    init_tracing()?;
    if let Err(error) = dotenv {
        warn!(%error, "no .env file loaded; using process environment only");
    }

    let (database, server_settings) = load_settings()?;
    let pool_config = database
        .pool_config()
        .wrap_err("invalid database settings")?;
    info!(database = %pool_config.redacted_url(), "connecting to database");

    let database_url = pool_config.database_url().to_owned();
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;

    let users = Arc::new(DieselUserRepository::new(pool));
    let health_state = web::Data::new(HealthState::new());
    let config =
        ServerConfig::from_settings(&server_settings).wrap_err("invalid server settings")?;
    info!(
        host = %server_settings.host,
        port = server_settings.port,
        "starting HTTP server"
    );
    let server = create_server(health_state.clone(), users, config)
        .wrap_err("failed to start HTTP server")?;

    actix_web::rt::spawn(drain_on_signal(server.handle(), health_state.clone()));
    server.await.wrap_err("HTTP server terminated abnormally")?;
    health_state.mark_unhealthy();
    info!("server stopped");
    Ok(())
}
