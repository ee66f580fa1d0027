//! Server construction and middleware wiring shared by `main` and tests.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use std::net::SocketAddr;

use crate::inbound::http::accounts::{login, logout, register};
use crate::inbound::http::discovery::{get_states, search};
use crate::inbound::http::favorites::{add_favorite, delete_favorite, list_favorites};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
#[cfg(debug_assertions)]
use crate::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Runtime settings for creating the HTTP server.
pub struct ServerConfig {
    /// Session cookie signing key.
    pub key: Key,
    /// Whether session cookies require HTTPS.
    pub cookie_secure: bool,
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration.
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
        }
    }
}

/// Build the cookie session middleware used by the `/api` scope.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Assemble the application: tracing middleware, session-guarded `/api`
/// scope, and unauthenticated health probes.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .wrap(session_middleware(key, cookie_secure))
        .service(register)
        .service(login)
        .service(logout)
        .service(get_states)
        .service(search)
        .service(list_favorites)
        .service(add_favorite)
        .service(delete_favorite);

    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
