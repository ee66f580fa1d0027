//! Driven and driving ports decoupling the domain from adapters.
//!
//! Each port owns its error enum; adapters map infrastructure failures into
//! these variants so services never see diesel or reqwest types.

mod account_service;
mod completion_source;
mod content_gateway;
mod favorite_repository;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use completion_source::{CompletionSource, CompletionSourceError};
#[cfg(test)]
pub use completion_source::MockCompletionSource;
pub use content_gateway::ContentGateway;
#[cfg(test)]
pub use content_gateway::MockContentGateway;
pub use favorite_repository::{
    AddFavoriteOutcome, FavoritePersistenceError, FavoriteRepository,
};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
