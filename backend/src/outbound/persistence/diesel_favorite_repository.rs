//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.
//!
//! Duplicate adds are resolved by the `unique_favorite` constraint: the insert
//! uses `ON CONFLICT DO NOTHING RETURNING id`, so a concurrent duplicate
//! surfaces as "already exists" rather than an error. Mutations run inside a
//! transaction and roll back on any persistence failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{AddFavoriteOutcome, FavoritePersistenceError, FavoriteRepository};
use crate::domain::{Favorite, FavoriteDraft, FavoriteId, UserId};

use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel-backed implementation of the `FavoriteRepository` port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain favourite persistence errors.
fn map_pool_error(error: PoolError) -> FavoritePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            FavoritePersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain favourite persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> FavoritePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FavoritePersistenceError::connection("database connection error")
        }
        _ => FavoritePersistenceError::query("database error"),
    }
}

fn row_to_favorite(row: FavoriteRow) -> Favorite {
    Favorite::new(
        FavoriteId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        row.state,
        row.place_name,
        row.category,
        row.created_at,
    )
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .order(favorites::created_at.desc())
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_favorite).collect())
    }

    async fn add(
        &self,
        user_id: &UserId,
        draft: &FavoriteDraft,
    ) -> Result<AddFavoriteOutcome, FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewFavoriteRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            state: draft.state(),
            place_name: draft.place_name(),
            category: draft.category(),
        };

        let inserted: Option<Uuid> = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(favorites::table)
                        .values(&new_row)
                        .on_conflict_do_nothing()
                        .returning(favorites::id)
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(match inserted {
            Some(id) => AddFavoriteOutcome::Created(FavoriteId::from_uuid(id)),
            None => AddFavoriteOutcome::AlreadyExists,
        })
    }

    async fn remove(
        &self,
        user_id: &UserId,
        favorite_id: &FavoriteId,
    ) -> Result<(), FavoritePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row_id = *favorite_id.as_uuid();
        let owner_id = *user_id.as_uuid();
        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    // Ownership check is part of the predicate: another user's
                    // row is indistinguishable from a missing one.
                    diesel::delete(
                        favorites::table
                            .filter(favorites::id.eq(row_id))
                            .filter(favorites::user_id.eq(owner_id)),
                    )
                    .execute(conn)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(FavoritePersistenceError::NotFound);
        }
        Ok(())
    }
}
