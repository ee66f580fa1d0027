//! Backend entry-point: configuration, pool and migrations, adapter wiring.

use std::net::SocketAddr;
use std::sync::Arc;
use std::{env, io};

use actix_web::cookie::Key;
use actix_web::{web, HttpServer};
use diesel::Connection;
use diesel_migrations::MigrationHarness;
use tracing::{info, warn};
use url::Url;
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::{CompletionContentGateway, CredentialAccountService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::mistral::{MistralHttpSource, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use backend::outbound::persistence::{
    DbPool, DieselFavoriteRepository, DieselUserRepository, PoolConfig, MIGRATIONS,
};
use backend::server::{build_app, ServerConfig};

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

    let config = server_config_from_env()?;

    let database_url = required_env("DATABASE_URL")?;
    run_migrations(database_url.clone()).await?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|e| io::Error::other(format!("building database pool failed: {e}")))?;

    let http_state = web::Data::new(build_http_state(pool)?);
    let health_state = web::Data::new(HealthState::new());

    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
    } = config;
    let server = HttpServer::new(move || {
        build_app(
            http_state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        )
    })
    .bind(bind_addr)?;

    info!(%bind_addr, "server starting");
    health_state.mark_ready();
    server.run().await
}

fn required_env(name: &str) -> io::Result<String> {
    env::var(name).map_err(|_| io::Error::other(format!("{name} must be set")))
}

fn server_config_from_env() -> io::Result<ServerConfig> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    Ok(ServerConfig::new(key, cookie_secure, bind_addr))
}

/// Apply pending migrations over a synchronous connection before the async
/// pool starts serving requests.
async fn run_migrations(database_url: String) -> io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = diesel::pg::PgConnection::establish(&database_url)
            .map_err(|e| io::Error::other(format!("connecting for migrations failed: {e}")))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| io::Error::other(format!("running migrations failed: {e}")))?;
        if !applied.is_empty() {
            info!(count = applied.len(), "applied pending migrations");
        }
        Ok(())
    })
    .await
    .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
}

fn build_http_state(pool: DbPool) -> io::Result<HttpState> {
    let accounts = Arc::new(CredentialAccountService::new(Arc::new(
        DieselUserRepository::new(pool.clone()),
    )));
    let favorites = Arc::new(DieselFavoriteRepository::new(pool));

    let api_key = required_env("MISTRAL_API_KEY")?;
    let endpoint = env::var("MISTRAL_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
    let endpoint = Url::parse(&endpoint)
        .map_err(|e| io::Error::other(format!("invalid MISTRAL_ENDPOINT: {e}")))?;
    let model = env::var("MISTRAL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let source = MistralHttpSource::new(endpoint, api_key, model)
        .map_err(|e| io::Error::other(format!("building generator client failed: {e}")))?;
    let content = Arc::new(CompletionContentGateway::new(Arc::new(source)));

    Ok(HttpState::new(accounts, favorites, content))
}
