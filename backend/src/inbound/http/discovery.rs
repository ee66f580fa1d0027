//! Discovery HTTP handlers: generated states and place search.
//!
//! ```text
//! GET  /api/states
//! POST /api/search {"state":"California","category":"beaches"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Generated, Place, PlaceCategory};
use crate::inbound::http::auth::require_current_user;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Response payload for the state listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatesResponse {
    /// Generated US state names.
    pub states: Vec<String>,
}

/// Request payload for a place search.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SearchRequest {
    /// US state to search in; required.
    #[schema(example = "California")]
    pub state: Option<String>,
    /// Category keyword; anything unrecognised falls back to "all".
    #[schema(example = "beaches")]
    pub category: Option<String>,
}

/// Response payload for a place search.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlacesResponse {
    /// Generated places, at most ten, each with its category label.
    pub places: Vec<Place>,
}

/// List US states from the generator.
///
/// Degradation (generator unreachable or replying with noise) is reported as
/// a failure here so the states page can show its retry notice.
#[utoipa::path(
    get,
    path = "/api/states",
    responses(
        (status = 200, description = "Generated state names", body = StatesResponse),
        (status = 401, description = "No active session"),
        (status = 500, description = "Generator unavailable")
    ),
    tags = ["discovery"],
    operation_id = "listStates"
)]
#[get("/states")]
pub async fn get_states(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatesResponse>> {
    let _ = require_current_user(&state, &session).await?;

    match state.content.list_states().await {
        Generated::Content(states) if !states.is_empty() => {
            Ok(web::Json(StatesResponse { states }))
        }
        _ => Err(Error::internal("Failed to fetch states")),
    }
}

/// Search places in a state, optionally scoped by category.
///
/// A degraded generator yields an empty `places` list with status 200: the
/// search page stays usable and shows "no results" instead of an error page.
#[utoipa::path(
    post,
    path = "/api/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Generated places (possibly empty)", body = PlacesResponse),
        (status = 400, description = "State name missing"),
        (status = 401, description = "No active session")
    ),
    tags = ["discovery"],
    operation_id = "searchPlaces"
)]
#[post("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<PlacesResponse>> {
    let _ = require_current_user(&state, &session).await?;

    let request = payload.into_inner();
    let state_name = request
        .state
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::invalid_request("State name is required"))?
        .to_owned();
    let category = PlaceCategory::parse(request.category.as_deref().unwrap_or("all"));

    let places = state
        .content
        .list_places(&state_name, category)
        .await
        .into_items();
    Ok(web::Json(PlacesResponse { places }))
}
