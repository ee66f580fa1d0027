//! Account service: registration, login verification, session restoration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{AccountService, UserPersistenceError, UserRepository};
use crate::domain::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::domain::{Error, LoginCredentials, StoredPasswordHash, User, UserId, Username};

/// One message for both unknown-username and wrong-password so login failures
/// cannot be used to enumerate accounts.
const INVALID_LOGIN: &str = "Invalid username or password";

const STORE_UNAVAILABLE: &str = "Unable to reach the account store. Please try again later.";

/// Default bound for session-restoration retries: the store may drop idle
/// connections, so three attempts two seconds apart ride out a reconnect
/// without masking a real outage.
fn default_resolve_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_secs(2))
}

/// [`AccountService`] implementation over a user repository.
#[derive(Clone)]
pub struct CredentialAccountService {
    users: Arc<dyn UserRepository>,
    resolve_retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl CredentialAccountService {
    /// Build a service with the default retry policy and tokio sleeper.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self::with_retry(users, default_resolve_retry(), Arc::new(TokioSleeper))
    }

    /// Build a service with an explicit retry policy and sleeper, used by
    /// tests to run without real delays.
    pub fn with_retry(
        users: Arc<dyn UserRepository>,
        resolve_retry: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            users,
            resolve_retry,
            sleeper,
        }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername => Error::conflict("Username already exists"),
        UserPersistenceError::Connection { message } => {
            tracing::error!(error = %message, "user store connection failure");
            Error::service_unavailable(STORE_UNAVAILABLE)
        }
        UserPersistenceError::Query { message } => {
            tracing::error!(error = %message, "user store query failure");
            Error::internal("Account store error")
        }
    }
}

#[async_trait]
impl AccountService for CredentialAccountService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let password_hash = StoredPasswordHash::derive(credentials.password())
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;

        let user = User::new(
            UserId::random(),
            username,
            password_hash,
            chrono::Utc::now(),
        );
        self.users
            .create(&user)
            .await
            .map_err(map_user_persistence_error)?;

        tracing::info!(user_id = %user.id(), "registered new user");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|_| Error::unauthorized(INVALID_LOGIN))?;
        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?;

        match user {
            Some(user) if user.password_hash().verify(credentials.password()) => Ok(user),
            _ => Err(Error::unauthorized(INVALID_LOGIN)),
        }
    }

    async fn resolve(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.resolve_retry
            .run(
                self.sleeper.as_ref(),
                UserPersistenceError::is_transient,
                || self.users.find_by_id(id),
            )
            .await
            .map_err(map_user_persistence_error)
    }
}
