//! Backend entry-point: applies migrations, builds the pool and serves the
//! workout and user endpoints.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{
    DatabaseSettings, DbPool, PoolConfig, run_pending_migrations,
};
use server::{ServerConfig, ServerSettings, create_server};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let server_settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("failed to load server settings", err))?;
    // Database settings come from the environment or config file only; the
    // command line belongs to the server settings.
    let database_settings = DatabaseSettings::load_from_iter([OsString::from("fitness-backend")])
        .map_err(|err| startup_error("failed to load database settings", err))?;

    let bind_addr = server_settings
        .bind_addr()
        .map_err(|err| startup_error("invalid server settings", err))?;
    let request_timeout = server_settings
        .request_timeout()
        .map_err(|err| startup_error("invalid server settings", err))?;
    let pool_max_size = server_settings
        .pool_max_size()
        .map_err(|err| startup_error("invalid server settings", err))?;
    let hash_cost = server_settings
        .hash_cost()
        .map_err(|err| startup_error("invalid server settings", err))?;
    let database_url = database_settings
        .database_url()
        .map_err(|err| startup_error("invalid database settings", err))?;

    let applied = run_pending_migrations(database_url.clone())
        .await
        .map_err(|err| startup_error("failed to apply migrations", err))?;
    info!(applied = applied.len(), "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(pool_max_size))
        .await
        .map_err(|err| startup_error("failed to build database pool", err))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool)
        .with_request_timeout(request_timeout)
        .with_hash_cost(hash_cost);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
