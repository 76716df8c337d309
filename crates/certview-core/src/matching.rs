//! # Event-Name Matching
//!
//! Two matching rules exist, one per lookup path:
//!
//! - **Pattern match** ([`EventPattern`]), used by the find-by-event query.
//!   Whitespace in the query is dropped and arbitrary whitespace (`\s*`) is
//!   allowed between every remaining character, matched case-insensitively
//!   and unanchored. `"codefest"`, `"CODE FEST"` and `"code   fest"` all
//!   match `"Code Fest"`; `"fest"` matches it too.
//! - **Slug equality** ([`find_by_address`]), used when resolving a
//!   `/certificate/{srn}/{slug}` address: the record's event is normalized
//!   into a slug and compared for equality.
//!
//! Both require the student id to match exactly.

use regex::{Regex, RegexBuilder};

use crate::address::CertificateAddress;
use crate::certificate::Certificate;
use crate::error::ValidationError;

/// Most non-whitespace characters an event query may carry.
pub const MAX_EVENT_QUERY_CHARS: usize = 256;

/// Compiled, whitespace-tolerant event-name pattern.
#[derive(Debug, Clone)]
pub struct EventPattern {
    source: String,
    regex: Regex,
}

impl EventPattern {
    /// Build a pattern from a free-text query fragment.
    ///
    /// Blank queries are rejected: they would otherwise match every event.
    /// Queries over [`MAX_EVENT_QUERY_CHARS`] significant characters are
    /// rejected before compiling.
    pub fn new(query: &str) -> Result<Self, ValidationError> {
        let len = query.chars().filter(|c| !c.is_whitespace()).count();
        if len > MAX_EVENT_QUERY_CHARS {
            return Err(ValidationError::EventTooLong {
                len,
                max: MAX_EVENT_QUERY_CHARS,
            });
        }
        let source = pattern_source(query).ok_or(ValidationError::MissingEvent)?;
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            // Every character is escaped, so only the compiled size limit
            // can fail here.
            .map_err(|_| ValidationError::EventTooLong {
                len,
                max: MAX_EVENT_QUERY_CHARS,
            })?;
        Ok(Self { source, regex })
    }

    /// The regular expression source, suitable for a store-side
    /// case-insensitive regex match (PostgreSQL `~*`).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the pattern occurs in `event`.
    pub fn is_match(&self, event: &str) -> bool {
        self.regex.is_match(event)
    }

    /// True when `certificate` has exactly `srn` and an event this pattern
    /// matches.
    pub fn matches(&self, srn: &str, certificate: &Certificate) -> bool {
        certificate.srn == srn && self.is_match(&certificate.event)
    }
}

/// Escaped regex source for `query`, or `None` when it is blank.
fn pattern_source(query: &str) -> Option<String> {
    let pieces: Vec<String> = query
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| regex::escape(c.encode_utf8(&mut [0u8; 4])))
        .collect();
    if pieces.is_empty() {
        None
    } else {
        Some(pieces.join(r"\s*"))
    }
}

/// Linear scan for the first record living at `address`.
///
/// Used on every detail view: the store has no slug column, so the full
/// record set is fetched and each event name normalized in turn.
pub fn find_by_address<'a, I>(records: I, address: &CertificateAddress) -> Option<&'a Certificate>
where
    I: IntoIterator<Item = &'a Certificate>,
{
    records.into_iter().find(|c| address.matches(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cert(srn: &str, event: &str) -> Certificate {
        Certificate::new(srn, event, "https://img.example/c.png", Utc::now())
    }

    #[test]
    fn query_variants_match_code_fest() {
        let record = cert("PES1", "Code Fest");
        for query in ["codefest", "CODE FEST", "code   fest", "Code Fest"] {
            let pattern = EventPattern::new(query).unwrap();
            assert!(pattern.matches("PES1", &record), "query {query:?} should match");
        }
    }

    #[test]
    fn pattern_is_unanchored() {
        let pattern = EventPattern::new("fest").unwrap();
        assert!(pattern.is_match("Code Fest 2025"));
    }

    #[test]
    fn pattern_tolerates_irregular_stored_spacing() {
        let pattern = EventPattern::new("code fest").unwrap();
        assert!(pattern.is_match("Code\t  Fest"));
    }

    #[test]
    fn srn_must_match_exactly() {
        let pattern = EventPattern::new("codefest").unwrap();
        assert!(!pattern.matches("PES2", &cert("PES1", "Code Fest")));
        assert!(!pattern.matches("pes1", &cert("PES1", "Code Fest")));
    }

    #[test]
    fn metacharacters_are_literal() {
        let pattern = EventPattern::new("C++ (Basics)").unwrap();
        assert!(pattern.is_match("c++ (basics) workshop"));
        assert!(!pattern.is_match("cc (basics)"));

        let dot = EventPattern::new("v1.0").unwrap();
        assert!(!dot.is_match("v1x0"));
    }

    #[test]
    fn overlong_query_is_rejected_as_too_long() {
        let query = "x".repeat(MAX_EVENT_QUERY_CHARS + 1);
        assert_eq!(
            EventPattern::new(&query).unwrap_err(),
            ValidationError::EventTooLong {
                len: MAX_EVENT_QUERY_CHARS + 1,
                max: MAX_EVENT_QUERY_CHARS,
            }
        );
    }

    #[test]
    fn query_at_the_limit_compiles() {
        let query = "x ".repeat(MAX_EVENT_QUERY_CHARS);
        let pattern = EventPattern::new(&query).unwrap();
        assert!(pattern.is_match(&"x".repeat(MAX_EVENT_QUERY_CHARS)));
    }

    #[test]
    fn source_joins_escaped_characters() {
        let pattern = EventPattern::new("a b.").unwrap();
        assert_eq!(pattern.source(), r"a\s*b\s*\.");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(EventPattern::new("").is_err());
        assert!(EventPattern::new("  \t").is_err());
    }

    #[test]
    fn unrelated_event_does_not_match() {
        let pattern = EventPattern::new("ideathon").unwrap();
        assert!(!pattern.is_match("Code Fest"));
    }

    #[test]
    fn find_by_address_returns_first_match() {
        let mut first = cert("PES1", "Code Fest 2025");
        first.student_name = Some("first".into());
        let mut second = cert("PES1", "code fest 2025");
        second.student_name = Some("second".into());
        let records = vec![cert("PES2", "Code Fest 2025"), first, second];

        let address = CertificateAddress::new(Some("PES1"), Some("codefest2025")).unwrap();
        let found = find_by_address(&records, &address).unwrap();
        assert_eq!(found.student_name.as_deref(), Some("first"));
    }

    #[test]
    fn find_by_address_requires_whole_slug() {
        let records = vec![cert("PES1", "Code Fest 2025")];
        let address = CertificateAddress::new(Some("PES1"), Some("codefest")).unwrap();
        assert!(find_by_address(&records, &address).is_none());
    }
}
