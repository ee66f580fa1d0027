//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::domain::Place;
use crate::inbound::http::accounts::{self, CredentialsRequest};
use crate::inbound::http::discovery::{self, PlacesResponse, SearchRequest, StatesResponse};
use crate::inbound::http::favorites::{
    self, AddFavoriteRequest, FavoriteItem, FavoritesResponse,
};
use crate::inbound::http::health;

/// Public OpenAPI surface served by the debug-only Swagger UI.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel discovery API",
        description = "Session-authenticated JSON API for generated US travel \
                       content and per-user favourites."
    ),
    paths(
        accounts::register,
        accounts::login,
        accounts::logout,
        discovery::get_states,
        discovery::search,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::delete_favorite,
        health::live,
        health::ready,
    ),
    components(schemas(
        CredentialsRequest,
        SearchRequest,
        StatesResponse,
        PlacesResponse,
        Place,
        AddFavoriteRequest,
        FavoriteItem,
        FavoritesResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and logout"),
        (name = "discovery", description = "Generated states and place search"),
        (name = "favorites", description = "Per-user saved places"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_every_api_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/register",
            "/api/login",
            "/api/logout",
            "/api/states",
            "/api/search",
            "/api/favorites/list",
            "/api/favorites",
            "/api/favorites/{id}",
            "/health/live",
            "/health/ready",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path in OpenAPI document: {path}"
            );
        }
    }
}
