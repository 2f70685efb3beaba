use serde::{Deserialize, Serialize};

use crate::types::EventCategory;

/// Optional filters applied when listing public events.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct EventFilter {
    /// Restricts results to a single category.
    pub category: Option<EventCategory>,
    /// Case-insensitive substring match against title, description and
    /// location.
    pub search: Option<String>,
}

impl EventFilter {
    /// Returns the search term, ignoring empty or whitespace-only input.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_ignored() {
        let filter = EventFilter {
            category: None,
            search: Some("   ".to_owned()),
        };

        assert_eq!(filter.search_term(), None);
    }

    #[test]
    fn search_term_is_trimmed() {
        let filter = EventFilter {
            category: None,
            search: Some("  picnic ".to_owned()),
        };

        assert_eq!(filter.search_term(), Some("picnic"));
    }
}
