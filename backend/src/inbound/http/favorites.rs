//! Favourite HTTP handlers.
//!
//! ```text
//! GET    /api/favorites/list
//! POST   /api/favorites {"state":"California","place_name":"Pier 39","category":"beaches"}
//! DELETE /api/favorites/{id}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{AddFavoriteOutcome, FavoritePersistenceError};
use crate::domain::{Error, Favorite, FavoriteDraft, FavoriteId};
use crate::inbound::http::auth::require_current_user;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for saving a favourite.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddFavoriteRequest {
    /// US state the place belongs to.
    #[schema(example = "California")]
    pub state: Option<String>,
    /// Display name of the place.
    #[schema(example = "Pier 39")]
    pub place_name: Option<String>,
    /// Category the place was found under.
    #[schema(example = "beaches")]
    pub category: Option<String>,
}

/// One favourite in the listing response.
///
/// Field names are part of the wire contract and stay snake_case.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteItem {
    /// Stable favourite identifier.
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: FavoriteId,
    /// US state the place belongs to.
    pub state: String,
    /// Display name of the place.
    pub place_name: String,
    /// Category the place was saved under.
    pub category: String,
}

impl From<Favorite> for FavoriteItem {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: *favorite.id(),
            state: favorite.state().to_owned(),
            place_name: favorite.place_name().to_owned(),
            category: favorite.category().to_owned(),
        }
    }
}

/// Response payload for the favourites listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritesResponse {
    /// Saved favourites, newest first.
    pub favorites: Vec<FavoriteItem>,
}

/// Convert store failures into the 500 envelope, keeping detail in logs.
fn map_store_error(error: FavoritePersistenceError, message: &'static str) -> Error {
    match error {
        FavoritePersistenceError::NotFound => Error::not_found("Favorite not found"),
        FavoritePersistenceError::Connection { message: detail }
        | FavoritePersistenceError::Query { message: detail } => {
            tracing::error!(error = %detail, "favorite store failure");
            Error::internal(message)
        }
    }
}

/// List the current user's favourites, newest first.
#[utoipa::path(
    get,
    path = "/api/favorites/list",
    responses(
        (status = 200, description = "Saved favourites", body = FavoritesResponse),
        (status = 401, description = "No active session"),
        (status = 500, description = "Store error")
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites/list")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FavoritesResponse>> {
    let user = require_current_user(&state, &session).await?;

    let favorites = state
        .favorites
        .list_for_user(user.id())
        .await
        .map_err(|error| map_store_error(error, "Failed to fetch favorites"))?
        .into_iter()
        .map(FavoriteItem::from)
        .collect();
    Ok(web::Json(FavoritesResponse { favorites }))
}

/// Save a favourite; idempotent on the (state, place, category) tuple.
#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Favourite created"),
        (status = 200, description = "Favourite already existed"),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "No active session"),
        (status = 500, description = "Store error")
    ),
    tags = ["favorites"],
    operation_id = "addFavorite"
)]
#[post("/favorites")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddFavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let user = require_current_user(&state, &session).await?;

    let request = payload.into_inner();
    let draft = FavoriteDraft::new(
        request.state.as_deref(),
        request.place_name.as_deref(),
        request.category.as_deref(),
    )
    .map_err(|error| {
        tracing::debug!(field = error.field, "favorite payload incomplete");
        Error::invalid_request("Missing required fields")
    })?;

    let outcome = state
        .favorites
        .add(user.id(), &draft)
        .await
        .map_err(|error| map_store_error(error, "Failed to add favorite"))?;

    Ok(match outcome {
        AddFavoriteOutcome::Created(id) => HttpResponse::Created().json(json!({
            "message": "Favorite added successfully",
            "id": id,
        })),
        AddFavoriteOutcome::AlreadyExists => HttpResponse::Ok().json(json!({
            "message": "Favorite already exists",
        })),
    })
}

/// Delete one of the current user's favourites.
#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    params(("id" = Uuid, Path, description = "Favourite identifier")),
    responses(
        (status = 200, description = "Favourite deleted"),
        (status = 401, description = "No active session"),
        (status = 404, description = "Not found or owned by another user"),
        (status = 500, description = "Store error")
    ),
    tags = ["favorites"],
    operation_id = "deleteFavorite"
)]
#[delete("/favorites/{id}")]
pub async fn delete_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = require_current_user(&state, &session).await?;
    let favorite_id = FavoriteId::from_uuid(path.into_inner());

    state
        .favorites
        .remove(user.id(), &favorite_id)
        .await
        .map_err(|error| map_store_error(error, "Failed to delete favorite"))?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Favorite deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use chrono::Utc;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        MockAccountService, MockContentGateway, MockFavoriteRepository,
    };
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::fixture_user;

    fn test_state(favorites: MockFavoriteRepository) -> web::Data<HttpState> {
        let user = fixture_user("ada");
        let mut accounts = MockAccountService::new();
        accounts
            .expect_resolve()
            .returning(move |_| Ok(Some(user.clone())));
        web::Data::new(HttpState::new(
            Arc::new(accounts),
            Arc::new(favorites),
            Arc::new(MockContentGateway::new()),
        ))
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api")
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .service(list_favorites)
                .service(add_favorite)
                .service(delete_favorite)
                .service(login_shim),
        )
    }

    /// Minimal login used to obtain a session cookie for guarded requests.
    #[actix_web::post("/test-login")]
    async fn login_shim(session: SessionContext) -> ApiResult<HttpResponse> {
        session.persist_user(&UserId::random())?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn session_cookie<S>(app: &S) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/test-login")
                .to_request(),
        )
        .await;
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    fn stored_favorite(place_name: &str) -> Favorite {
        Favorite::new(
            FavoriteId::random(),
            UserId::random(),
            "California",
            place_name,
            "beaches",
            Utc::now(),
        )
    }

    #[actix_web::test]
    async fn listing_answers_empty_for_new_users() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_list_for_user()
            .returning(|_| Ok(Vec::new()));

        let app = actix_test::init_service(test_app(test_state(favorites))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/favorites/list")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("favorites").and_then(Value::as_array).map(Vec::len),
            Some(0)
        );
    }

    #[actix_web::test]
    async fn listing_serialises_the_wire_contract() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_list_for_user()
            .returning(|_| Ok(vec![stored_favorite("Pier 39")]));

        let app = actix_test::init_service(test_app(test_state(favorites))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/favorites/list")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let body: Value = actix_test::read_body_json(response).await;
        let first = body
            .get("favorites")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .expect("one favorite");
        assert!(first.get("id").is_some());
        assert_eq!(
            first.get("place_name").and_then(Value::as_str),
            Some("Pier 39")
        );
        assert_eq!(first.get("state").and_then(Value::as_str), Some("California"));
        assert_eq!(first.get("category").and_then(Value::as_str), Some("beaches"));
        assert!(first.get("created_at").is_none());
    }

    #[actix_web::test]
    async fn adding_a_new_favorite_is_created() {
        let id = FavoriteId::random();
        let expected_id = id.to_string();
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_add()
            .returning(move |_, _| Ok(AddFavoriteOutcome::Created(id)));

        let app = actix_test::init_service(test_app(test_state(favorites))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/favorites")
                .cookie(cookie)
                .set_json(AddFavoriteRequest {
                    state: Some("California".to_owned()),
                    place_name: Some("Pier 39".to_owned()),
                    category: Some("beaches".to_owned()),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Favorite added successfully")
        );
        assert_eq!(
            body.get("id").and_then(Value::as_str),
            Some(expected_id.as_str())
        );
    }

    #[actix_web::test]
    async fn re_adding_answers_ok_without_an_id() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_add()
            .returning(|_, _| Ok(AddFavoriteOutcome::AlreadyExists));

        let app = actix_test::init_service(test_app(test_state(favorites))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/favorites")
                .cookie(cookie)
                .set_json(AddFavoriteRequest {
                    state: Some("California".to_owned()),
                    place_name: Some("Pier 39".to_owned()),
                    category: Some("beaches".to_owned()),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Favorite already exists")
        );
        assert!(body.get("id").is_none());
    }

    #[actix_web::test]
    async fn missing_fields_are_a_bad_request() {
        let app =
            actix_test::init_service(test_app(test_state(MockFavoriteRepository::new()))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/favorites")
                .cookie(cookie)
                .set_json(AddFavoriteRequest {
                    state: Some("California".to_owned()),
                    place_name: None,
                    category: Some("beaches".to_owned()),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Missing required fields")
        );
    }

    #[actix_web::test]
    async fn deleting_a_missing_favorite_is_not_found() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_remove()
            .returning(|_, _| Err(FavoritePersistenceError::NotFound));

        let app = actix_test::init_service(test_app(test_state(favorites))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/favorites/{}", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Favorite not found")
        );
    }

    #[actix_web::test]
    async fn store_failures_answer_with_a_generic_500() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_add()
            .returning(|_, _| Err(FavoritePersistenceError::query("insert failed")));

        let app = actix_test::init_service(test_app(test_state(favorites))).await;
        let cookie = session_cookie(&app).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/favorites")
                .cookie(cookie)
                .set_json(AddFavoriteRequest {
                    state: Some("California".to_owned()),
                    place_name: Some("Pier 39".to_owned()),
                    category: Some("beaches".to_owned()),
                })
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Failed to add favorite")
        );
    }

    #[actix_web::test]
    async fn every_favorite_endpoint_requires_a_session() {
        let app =
            actix_test::init_service(test_app(test_state(MockFavoriteRepository::new()))).await;

        let requests = vec![
            actix_test::TestRequest::get()
                .uri("/api/favorites/list")
                .to_request(),
            actix_test::TestRequest::post()
                .uri("/api/favorites")
                .set_json(AddFavoriteRequest {
                    state: Some("California".to_owned()),
                    place_name: Some("Pier 39".to_owned()),
                    category: Some("beaches".to_owned()),
                })
                .to_request(),
            actix_test::TestRequest::delete()
                .uri(&format!("/api/favorites/{}", Uuid::new_v4()))
                .to_request(),
        ];
        for request in requests {
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
