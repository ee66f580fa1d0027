//! Travel-discovery backend library.
//!
//! Users register and authenticate with a cookie session, browse generated US
//! states and points of interest from an external chat-completion API, and
//! save favourites to a personal list. Layout follows ports-and-adapters:
//! `domain` owns entities, services, and ports; `inbound`/`outbound` hold the
//! HTTP, PostgreSQL, and generator adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
