//! Content gateway: prompts the external generator and parses its replies.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::content::{parse_bullet_list, Generated, Place};
use crate::domain::ports::{CompletionSource, ContentGateway};
use crate::domain::PlaceCategory;

/// Fixed prompt for the state listing.
pub const STATES_PROMPT: &str = "List all 50 US states in bullet points in English.";

/// Generators occasionally reply with their own apology text instead of a
/// list; such replies carry this marker and are treated as degradation.
const ERROR_MARKER: &str = "Error";

const MAX_STATES: usize = 50;
const MAX_PLACES: usize = 10;

/// [`ContentGateway`] implementation over a chat-completion source.
///
/// Every failure mode (transport, timeout, bad status, malformed JSON, empty
/// choices, or an error-marked reply) collapses to [`Generated::Degraded`].
#[derive(Clone)]
pub struct CompletionContentGateway {
    source: Arc<dyn CompletionSource>,
}

impl CompletionContentGateway {
    /// Build a gateway over the given source.
    pub fn new(source: Arc<dyn CompletionSource>) -> Self {
        Self { source }
    }

    /// Request one completion, folding every failure into `None`.
    async fn generate(&self, prompt: &str) -> Option<String> {
        match self.source.complete(prompt).await {
            Ok(text) if text.contains(ERROR_MARKER) => {
                tracing::warn!("generator reply carried an error marker, degrading to empty");
                None
            }
            Ok(text) => Some(text),
            Err(error) => {
                tracing::warn!(error = %error, "generator call failed, degrading to empty");
                None
            }
        }
    }
}

#[async_trait]
impl ContentGateway for CompletionContentGateway {
    async fn list_states(&self) -> Generated<String> {
        match self.generate(STATES_PROMPT).await {
            Some(text) => Generated::Content(parse_bullet_list(&text, MAX_STATES)),
            None => Generated::Degraded,
        }
    }

    async fn list_places(&self, state: &str, category: PlaceCategory) -> Generated<Place> {
        match self.generate(&category.prompt(state)).await {
            Some(text) => Generated::Content(
                parse_bullet_list(&text, MAX_PLACES)
                    .into_iter()
                    .map(|name| Place {
                        name,
                        category: category.label().to_owned(),
                    })
                    .collect(),
            ),
            None => Generated::Degraded,
        }
    }
}
