//! Domain entities, services, and ports.
//!
//! Types here are transport agnostic: inbound adapters map them to HTTP,
//! outbound adapters map them to SQL rows and generator payloads. Invariants
//! and serialisation contracts live in each type's Rustdoc.

pub mod accounts;
pub mod auth;
pub mod category;
pub mod content;
pub mod discovery;
pub mod error;
pub mod favorite;
pub mod password;
pub mod ports;
pub mod retry;
pub mod user;

pub use self::accounts::CredentialAccountService;
pub use self::auth::{CredentialValidationError, LoginCredentials};
pub use self::category::PlaceCategory;
pub use self::content::{parse_bullet_list, Generated, Place};
pub use self::discovery::CompletionContentGateway;
pub use self::error::{Error, ErrorCode};
pub use self::favorite::{Favorite, FavoriteDraft, FavoriteId, MissingFieldError};
pub use self::password::{PasswordHashError, StoredPasswordHash};
pub use self::retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use self::user::{User, UserId, Username};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
