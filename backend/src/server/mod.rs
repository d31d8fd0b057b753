//! Server construction, middleware wiring and graceful shutdown.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use users_backend::Trace;
#[cfg(debug_assertions)]
use users_backend::doc::ApiDoc;
use users_backend::domain::ports::UserRepository;
use users_backend::inbound::http::error::json_error_handler;
use users_backend::inbound::http::health::{self, HealthState};
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::users;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1").configure(users::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .configure(health::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over the given user store.
///
/// Readiness is marked once the listener is bound. Signal handling is left to
/// [`drain_on_signal`] so liveness can flip before the drain starts.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    users: Arc<dyn UserRepository>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        request_timeout,
        shutdown_timeout,
    } = config;
    let http_state = web::Data::new(HttpState::new(users).with_request_timeout(request_timeout));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .shutdown_timeout(shutdown_timeout.as_secs())
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for SIGINT or SIGTERM, fail the checks, then stop accepting
/// connections and drain in-flight requests.
pub async fn drain_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    wait_for_signal().await;
    health_state.mark_unhealthy();
    info!("shutdown signal received, draining in-flight requests");
    handle.stop(true).await;
}

async fn ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                () = ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; listening for Ctrl-C only");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}
