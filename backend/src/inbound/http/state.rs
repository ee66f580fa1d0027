//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, ContentGateway, FavoriteRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and session restoration.
    pub accounts: Arc<dyn AccountService>,
    /// Per-user saved places.
    pub favorites: Arc<dyn FavoriteRepository>,
    /// Generated discovery content.
    pub content: Arc<dyn ContentGateway>,
}

impl HttpState {
    /// Bundle the three service ports for handler injection.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        favorites: Arc<dyn FavoriteRepository>,
        content: Arc<dyn ContentGateway>,
    ) -> Self {
        Self {
            accounts,
            favorites,
            content,
        }
    }
}
