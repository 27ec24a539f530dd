//! Backend entry-point: loads settings, prepares storage, and serves the REST
//! API.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, build_http_state, create_server};
use todo_backend::inbound::http::health::HealthState;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from(std::env::args_os()).map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let base_path = settings.base_path().map_err(io::Error::other)?;

    let http_state = build_http_state(&settings)
        .await
        .map_err(io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::new(bind_addr, base_path.clone()),
    )?;
    info!(%bind_addr, base_path = %base_path, "todo backend listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
