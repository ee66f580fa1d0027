//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 50 characters).
        username -> Varchar,
        /// Argon2 PHC hash string.
        password_hash -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user saved places.
    ///
    /// Carries `unique_favorite` UNIQUE (user_id, state, place_name, category)
    /// so duplicate adds are rejected by the store, not the application.
    favorites (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// US state the place belongs to.
        state -> Varchar,
        /// Display name of the saved place.
        place_name -> Varchar,
        /// Category label the place was saved under.
        category -> Varchar,
        /// Creation timestamp used for newest-first listing.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(favorites -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, favorites);
