//! # Event Slugs
//!
//! The URL form of an event name: every whitespace character removed and the
//! remainder lower-cased. `"Code Fest 2025"` and `"code   FEST 2025"` both
//! become `codefest2025`.
//!
//! Normalization is idempotent, so a slug taken from a URL can be passed
//! through [`EventSlug::from_event_name`] again without changing it.

use serde::{Deserialize, Serialize};

/// A normalized event slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSlug(String);

impl EventSlug {
    /// Normalize a free-text event name (or an already-normalized slug).
    pub fn from_event_name(event: &str) -> Self {
        let slug: String = event
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self(slug)
    }

    /// The slug text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source name had no non-whitespace characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `event` normalizes to this slug.
    pub fn matches_event(&self, event: &str) -> bool {
        Self::from_event_name(event) == *self
    }
}

impl std::fmt::Display for EventSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_lowercases() {
        assert_eq!(
            EventSlug::from_event_name("Code Fest 2025").as_str(),
            "codefest2025"
        );
    }

    #[test]
    fn irregular_spacing_normalizes_identically() {
        let a = EventSlug::from_event_name("Code   Fest\t2025");
        let b = EventSlug::from_event_name(" code fest 2025 ");
        assert_eq!(a, b);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = EventSlug::from_event_name("Hack The Mountain");
        let twice = EventSlug::from_event_name(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn blank_name_yields_empty_slug() {
        assert!(EventSlug::from_event_name("   ").is_empty());
        assert!(EventSlug::from_event_name("").is_empty());
    }

    #[test]
    fn matches_event_ignores_case_and_spacing() {
        let slug = EventSlug::from_event_name("codefest");
        assert!(slug.matches_event("Code Fest"));
        assert!(slug.matches_event("CODE  FEST"));
        assert!(!slug.matches_event("Code Fest 2025"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let slug = EventSlug::from_event_name("Ideathon");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"ideathon\"");
    }
}
