//! In-memory adapters backing the API contract tests.
//!
//! These doubles implement the domain ports directly so the full HTTP stack
//! (session middleware, guards, handlers, services) runs without PostgreSQL
//! or the external generator.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use async_trait::async_trait;
use chrono::Utc;

use backend::domain::ports::{
    AddFavoriteOutcome, CompletionSource, CompletionSourceError, FavoritePersistenceError,
    FavoriteRepository, UserPersistenceError, UserRepository,
};
use backend::domain::{
    CompletionContentGateway, CredentialAccountService, Favorite, FavoriteDraft, FavoriteId,
    User, UserId, Username,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::server::build_app;

/// User store over a mutex-guarded vec; uniqueness enforced like the real
/// constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn user_count(&self) -> usize {
        self.users.lock().expect("user lock").len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("user lock");
        if users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserPersistenceError::DuplicateUsername);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().expect("user lock");
        Ok(users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().expect("user lock");
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }
}

/// Favourite store over a mutex-guarded vec kept in insertion order; listing
/// reverses it so newest rows come first, matching the real adapter's
/// `ORDER BY created_at DESC`.
#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Mutex<Vec<Favorite>>,
}

impl InMemoryFavoriteRepository {
    pub fn row_count(&self) -> usize {
        self.favorites.lock().expect("favorite lock").len()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoritePersistenceError> {
        let favorites = self.favorites.lock().expect("favorite lock");
        Ok(favorites
            .iter()
            .filter(|favorite| favorite.user_id() == user_id)
            .rev()
            .cloned()
            .collect())
    }

    async fn add(
        &self,
        user_id: &UserId,
        draft: &FavoriteDraft,
    ) -> Result<AddFavoriteOutcome, FavoritePersistenceError> {
        let mut favorites = self.favorites.lock().expect("favorite lock");
        let duplicate = favorites.iter().any(|favorite| {
            favorite.user_id() == user_id
                && favorite.state() == draft.state()
                && favorite.place_name() == draft.place_name()
                && favorite.category() == draft.category()
        });
        if duplicate {
            return Ok(AddFavoriteOutcome::AlreadyExists);
        }

        let id = FavoriteId::random();
        favorites.push(Favorite::new(
            id,
            *user_id,
            draft.state(),
            draft.place_name(),
            draft.category(),
            Utc::now(),
        ));
        Ok(AddFavoriteOutcome::Created(id))
    }

    async fn remove(
        &self,
        user_id: &UserId,
        favorite_id: &FavoriteId,
    ) -> Result<(), FavoritePersistenceError> {
        let mut favorites = self.favorites.lock().expect("favorite lock");
        let before = favorites.len();
        favorites
            .retain(|favorite| !(favorite.id() == favorite_id && favorite.user_id() == user_id));
        if favorites.len() == before {
            return Err(FavoritePersistenceError::NotFound);
        }
        Ok(())
    }
}

/// Completion source replaying a scripted queue of replies.
#[derive(Default)]
pub struct ScriptedCompletionSource {
    replies: Mutex<VecDeque<Result<String, CompletionSourceError>>>,
}

impl ScriptedCompletionSource {
    pub fn push_reply(&self, text: &str) {
        self.replies
            .lock()
            .expect("reply lock")
            .push_back(Ok(text.to_owned()));
    }

    pub fn push_failure(&self, error: CompletionSourceError) {
        self.replies
            .lock()
            .expect("reply lock")
            .push_back(Err(error));
    }
}

#[async_trait]
impl CompletionSource for ScriptedCompletionSource {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionSourceError> {
        self.replies
            .lock()
            .expect("reply lock")
            .pop_front()
            .unwrap_or_else(|| Err(CompletionSourceError::transport("no scripted reply")))
    }
}

/// Everything a contract test needs: the wired state plus handles to the
/// underlying doubles for assertions and scripting.
pub struct TestHarness {
    pub http_state: web::Data<HttpState>,
    pub users: Arc<InMemoryUserRepository>,
    pub favorites: Arc<InMemoryFavoriteRepository>,
    pub source: Arc<ScriptedCompletionSource>,
}

impl TestHarness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let favorites = Arc::new(InMemoryFavoriteRepository::default());
        let source = Arc::new(ScriptedCompletionSource::default());

        let accounts = Arc::new(CredentialAccountService::new(users.clone()));
        let content = Arc::new(CompletionContentGateway::new(source.clone()));
        let http_state = web::Data::new(HttpState::new(accounts, favorites.clone(), content));

        Self {
            http_state,
            users,
            favorites,
            source,
        }
    }

    /// Initialise a full application service for this harness.
    pub async fn app(
        &self,
    ) -> impl Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(build_app(
            self.http_state.clone(),
            web::Data::new(HealthState::new()),
            Key::generate(),
            false,
        ))
        .await
    }
}

/// Extract the session cookie from a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie present")
        .into_owned()
}

/// Register and log in `username`, returning its session cookie.
pub async fn registered_session<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let register = test::TestRequest::post()
        .uri("/api/register")
        .set_json(serde_json::json!({ "username": username, "password": password }))
        .to_request();
    let response = test::call_service(app, register).await;
    assert!(
        response.status().is_success(),
        "registration failed: {}",
        response.status()
    );

    let login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({ "username": username, "password": password }))
        .to_request();
    let response = test::call_service(app, login).await;
    assert!(
        response.status().is_success(),
        "login failed: {}",
        response.status()
    );
    session_cookie(&response)
}
