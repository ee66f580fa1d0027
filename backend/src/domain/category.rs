//! Place categories offered by the discovery surface.

use std::fmt;

/// Fixed category set for place searches.
///
/// Unrecognised input is folded into [`PlaceCategory::All`] rather than
/// rejected, so a stale or creative client still gets the default search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceCategory {
    /// Famous tourist places of any kind.
    #[default]
    All,
    /// Mountains and scenic peaks.
    Mountains,
    /// Parks and nature spots.
    Parks,
    /// Museums.
    Museums,
    /// Temples and religious sites.
    Temples,
    /// Beaches.
    Beaches,
    /// Historical sites.
    Historical,
}

impl PlaceCategory {
    /// All recognised categories, in display order.
    pub const ALL: [Self; 7] = [
        Self::All,
        Self::Mountains,
        Self::Parks,
        Self::Museums,
        Self::Temples,
        Self::Beaches,
        Self::Historical,
    ];

    /// Parse a category keyword, falling back to [`Self::All`] for anything
    /// unrecognised (including casing differences).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mountains" => Self::Mountains,
            "parks" => Self::Parks,
            "museums" => Self::Museums,
            "temples" => Self::Temples,
            "beaches" => Self::Beaches,
            "historical" => Self::Historical,
            _ => Self::All,
        }
    }

    /// Keyword accepted on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mountains => "mountains",
            Self::Parks => "parks",
            Self::Museums => "museums",
            Self::Temples => "temples",
            Self::Beaches => "beaches",
            Self::Historical => "historical",
        }
    }

    /// Title-case label attached to generated places.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Mountains => "Mountains",
            Self::Parks => "Parks",
            Self::Museums => "Museums",
            Self::Temples => "Temples",
            Self::Beaches => "Beaches",
            Self::Historical => "Historical",
        }
    }

    /// Generator prompt requesting places of this category in `state`.
    pub fn prompt(&self, state: &str) -> String {
        match self {
            Self::All => {
                format!("List 10 famous tourist places in {state} in bullet points in English.")
            }
            Self::Mountains => format!(
                "List 10 famous mountains or scenic peaks in {state} in bullet points in English."
            ),
            Self::Parks => format!(
                "List 10 famous parks or nature spots in {state} in bullet points in English."
            ),
            Self::Museums => {
                format!("List 10 famous museums in {state} in bullet points in English.")
            }
            Self::Temples => format!(
                "List 10 famous temples or religious sites in {state} in bullet points in English."
            ),
            Self::Beaches => {
                format!("List 10 famous beaches in {state} in bullet points in English.")
            }
            Self::Historical => {
                format!("List 10 famous historical sites in {state} in bullet points in English.")
            }
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
