//! Generated-content values and the bullet-list parsing rule.
//!
//! Content produced by the external generator is transient: parsed per
//! request, never cached or persisted.

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of a generation call.
///
/// Degradation is a value, not an error: callers branch on it explicitly and
/// can never mistake an unreachable generator for a hard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    /// The generator answered and the response parsed.
    Content(Vec<T>),
    /// The generator was unreachable, timed out, or replied with noise; the
    /// caller should present an empty result.
    Degraded,
}

impl<T> Generated<T> {
    /// Return whether this outcome is the degraded fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }

    /// Collapse to the parsed items, with degradation becoming an empty list.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Content(items) => items,
            Self::Degraded => Vec::new(),
        }
    }
}

/// One generated place paired with its category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Place {
    /// Place name as produced by the generator.
    #[schema(example = "Golden Gate Park")]
    pub name: String,
    /// Title-case category label ("All" for the default search).
    #[schema(example = "Parks")]
    pub category: String,
}

/// Parse free-form bullet text into at most `limit` trimmed entries.
///
/// The rule is load-bearing for compatibility with existing clients: split on
/// line breaks, drop blank lines, strip leading bullet dashes and surrounding
/// whitespace, preserve order.
pub fn parse_bullet_list(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim_matches(|c: char| c == '-' || c.is_whitespace())
                .to_owned()
        })
        .filter(|entry| !entry.is_empty())
        .take(limit)
        .collect()
}
