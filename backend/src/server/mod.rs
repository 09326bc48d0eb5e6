//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use markbook::Trace;
use markbook::inbound::http::health::HealthState;
use markbook::inbound::http::routes::configure;
use markbook::inbound::http::state::HttpState;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .wrap(Trace)
        .configure(move |cfg| configure(cfg, &http_state))
}

/// Construct the HTTP server from validated configuration.
///
/// The route table is built once per worker from the same immutable
/// [`HttpState`]. `health_state` is marked ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = HttpState::fixtures(config.lookup());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    info!(bind_addr = %config.bind_addr(), "markbook listening");
    health_state.mark_ready();
    Ok(server)
}
