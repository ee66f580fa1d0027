//! Port abstraction for favourite persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Favorite, FavoriteDraft, FavoriteId, UserId};

/// Persistence errors raised by favourite repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoritePersistenceError {
    /// No favourite with that id is owned by the acting user.
    #[error("favorite not found")]
    NotFound,
    /// Repository connection could not be established or was dropped.
    #[error("favorite repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("favorite repository query failed: {message}")]
    Query { message: String },
}

impl FavoritePersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Result of an idempotent add: a fresh row or the pre-existing tuple.
///
/// "Already exists" is a success outcome, not an error; the API layer maps it
/// to 200 instead of 201.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFavoriteOutcome {
    /// A new row was inserted.
    Created(FavoriteId),
    /// The (user, state, place, category) tuple was already saved.
    AlreadyExists,
}

/// Port for favourite persistence.
///
/// Uniqueness of (user, state, place, category) is enforced by the store's
/// unique constraint; adapters resolve concurrent duplicate adds by
/// interpreting the constraint rejection as [`AddFavoriteOutcome::AlreadyExists`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Favourites owned by `user_id`, newest first; empty when none.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoritePersistenceError>;

    /// Idempotently save a draft for `user_id`.
    async fn add(
        &self,
        user_id: &UserId,
        draft: &FavoriteDraft,
    ) -> Result<AddFavoriteOutcome, FavoritePersistenceError>;

    /// Delete a favourite owned by `user_id`;
    /// [`FavoritePersistenceError::NotFound`] when the row is absent or owned
    /// by someone else.
    async fn remove(
        &self,
        user_id: &UserId,
        favorite_id: &FavoriteId,
    ) -> Result<(), FavoritePersistenceError>;
}
