//! Driving port for on-demand travel content.

use async_trait::async_trait;

use crate::domain::{Generated, Place, PlaceCategory};

/// Use-case surface for generated discovery content.
///
/// Both operations are infallible by design: generator trouble of any kind is
/// reported as [`Generated::Degraded`], never as an error, so the UI always
/// has a renderable (if empty) result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// List US state names, at most 50.
    async fn list_states(&self) -> Generated<String>;

    /// List places in `state` for `category`, at most 10, each labelled with
    /// the category's display form.
    async fn list_places(&self, state: &str, category: PlaceCategory) -> Generated<Place>;
}
