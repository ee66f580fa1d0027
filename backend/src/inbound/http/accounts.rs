//! Account HTTP handlers.
//!
//! ```text
//! POST /api/register {"username":"ada","password":"secret"}
//! POST /api/login    {"username":"ada","password":"secret"}
//! POST /api/logout
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{CredentialValidationError, Error, LoginCredentials};
use crate::inbound::http::auth::require_current_user;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Credential payload shared by registration and login.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    /// Login name, trimmed before use.
    #[schema(example = "ada")]
    pub username: String,
    /// Plaintext password; hashed before it reaches the store.
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

impl TryFrom<CredentialsRequest> for LoginCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_credential_validation_error(err: CredentialValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(map_credential_validation_error)?;
    let user = state.accounts.register(&credentials).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Registration successful. Please log in.",
        "id": user.id(),
    })))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(map_credential_validation_error)?;
    let user = state.accounts.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Login successful" })))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "No active session"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _ = require_current_user(&state, &session).await?;
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        MockAccountService, MockContentGateway, MockFavoriteRepository,
    };
    use crate::inbound::http::test_utils::fixture_user;

    fn test_state(accounts: MockAccountService) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(accounts),
            Arc::new(MockFavoriteRepository::new()),
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
                .service(register)
                .service(login)
                .service(logout),
        )
    }

    fn credentials_json(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[actix_web::test]
    async fn register_answers_created_with_the_new_id() {
        let user = fixture_user("ada");
        let expected_id = user.id().to_string();
        let mut accounts = MockAccountService::new();
        accounts
            .expect_register()
            .returning(move |_| Ok(user.clone()));

        let app = actix_test::init_service(test_app(test_state(accounts))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(credentials_json("ada", "secret"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("id").and_then(Value::as_str),
            Some(expected_id.as_str())
        );
    }

    #[actix_web::test]
    async fn duplicate_registration_is_a_conflict() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_register()
            .returning(|_| Err(Error::conflict("Username already exists")));

        let app = actix_test::init_service(test_app(test_state(accounts))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(credentials_json("ada", "secret"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Username already exists")
        );
    }

    #[actix_web::test]
    async fn blank_username_is_a_bad_request() {
        let app =
            actix_test::init_service(test_app(test_state(MockAccountService::new()))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(credentials_json("   ", "secret"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn login_sets_a_session_cookie() {
        let user = fixture_user("ada");
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .returning(move |_| Ok(user.clone()));

        let app = actix_test::init_service(test_app(test_state(accounts))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/login")
                .set_json(credentials_json("ada", "secret"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session"));
    }

    #[actix_web::test]
    async fn failed_login_keeps_a_visible_message() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("Invalid username or password")));

        let app = actix_test::init_service(test_app(test_state(accounts))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/login")
                .set_json(credentials_json("ada", "wrong"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Invalid username or password")
        );
    }

    #[actix_web::test]
    async fn logout_without_session_is_unauthorised() {
        let app =
            actix_test::init_service(test_app(test_state(MockAccountService::new()))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/api/logout").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
