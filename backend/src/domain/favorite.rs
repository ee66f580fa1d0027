//! Saved-place model: a user's favourite (state, place, category) tuple.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Stable favourite identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(Uuid);

impl FavoriteId {
    /// Generate a new random [`FavoriteId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation error raised when a favourite payload is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required field: {field}")]
pub struct MissingFieldError {
    /// Name of the blank or absent field.
    pub field: &'static str,
}

/// A validated, not-yet-persisted favourite.
///
/// ## Invariants
/// - `state`, `place_name`, and `category` are trimmed and non-empty; blank
///   input never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteDraft {
    state: String,
    place_name: String,
    category: String,
}

impl FavoriteDraft {
    /// Validate raw request fields into a draft.
    ///
    /// Each field may be absent or blank; the first offending field is named
    /// in the error.
    pub fn new(
        state: Option<&str>,
        place_name: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, MissingFieldError> {
        let state = required(state, "state")?;
        let place_name = required(place_name, "place_name")?;
        let category = required(category, "category")?;
        Ok(Self {
            state,
            place_name,
            category,
        })
    }

    /// US state the place belongs to.
    pub fn state(&self) -> &str {
        self.state.as_str()
    }

    /// Display name of the saved place.
    pub fn place_name(&self) -> &str {
        self.place_name.as_str()
    }

    /// Category label the place was saved under.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, MissingFieldError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(MissingFieldError { field }),
    }
}

/// A persisted favourite owned by exactly one user.
///
/// Rows are immutable once created; the only lifecycle transitions are insert
/// and owner-scoped delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    id: FavoriteId,
    user_id: UserId,
    state: String,
    place_name: String,
    category: String,
    created_at: DateTime<Utc>,
}

impl Favorite {
    /// Build a [`Favorite`] from stored components.
    pub fn new(
        id: FavoriteId,
        user_id: UserId,
        state: impl Into<String>,
        place_name: impl Into<String>,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            state: state.into(),
            place_name: place_name.into(),
            category: category.into(),
            created_at,
        }
    }

    /// Stable favourite identifier.
    pub fn id(&self) -> &FavoriteId {
        &self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// US state the place belongs to.
    pub fn state(&self) -> &str {
        self.state.as_str()
    }

    /// Display name of the saved place.
    pub fn place_name(&self) -> &str {
        self.place_name.as_str()
    }

    /// Category label the place was saved under.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Creation timestamp used for newest-first listing.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
