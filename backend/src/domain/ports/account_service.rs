//! Driving port for account registration, login, and session restoration.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Use-case surface for everything credential-shaped.
///
/// Implementations own hashing and the retry policy for session restoration;
/// handlers only deal in domain errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user; `Conflict` when the username is taken.
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Verify credentials; `Unauthorized` with one shared message for both
    /// unknown usernames and wrong passwords.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Restore a user for an existing session. `Ok(None)` when the id no
    /// longer resolves; `ServiceUnavailable` once bounded retries are
    /// exhausted.
    async fn resolve(&self, id: &UserId) -> Result<Option<User>, Error>;
}
