//! # Gallery Filtering
//!
//! Two independent, case-insensitive substring filters: one over the student
//! id and one over the event name. An empty query filters nothing; both
//! queries are combined with AND.

use serde::{Deserialize, Serialize};

use crate::certificate::Certificate;

/// Student-id and event-name substring filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateFilter {
    /// Substring searched for in `srn`.
    pub srn: String,
    /// Substring searched for in `event`.
    pub event: String,
}

impl CertificateFilter {
    /// A filter with both queries set.
    pub fn new(srn: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            srn: srn.into(),
            event: event.into(),
        }
    }

    /// True when neither query is set.
    pub fn is_empty(&self) -> bool {
        self.srn.is_empty() && self.event.is_empty()
    }

    /// Reset both queries.
    pub fn clear(&mut self) {
        self.srn.clear();
        self.event.clear();
    }

    /// True when `certificate` passes both queries.
    pub fn matches(&self, certificate: &Certificate) -> bool {
        contains_ignore_case(&certificate.srn, &self.srn)
            && contains_ignore_case(&certificate.event, &self.event)
    }

    /// The records passing both queries, in their original order.
    pub fn apply<'a>(&self, records: &'a [Certificate]) -> Vec<&'a Certificate> {
        records.iter().filter(|c| self.matches(c)).collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample() -> Vec<Certificate> {
        vec![
            Certificate::new("PES1UG20CS001", "Code Fest 2025", "u", Utc::now()),
            Certificate::new("PES1UG20CS002", "Ideathon", "u", Utc::now()),
            Certificate::new("PES2UG21EC010", "Code Fest 2025", "u", Utc::now()),
        ]
    }

    #[test]
    fn empty_filter_passes_everything() {
        let records = sample();
        assert_eq!(CertificateFilter::default().apply(&records).len(), 3);
    }

    #[test]
    fn srn_filter_is_case_insensitive_substring() {
        let records = sample();
        let filter = CertificateFilter::new("pes1ug", "");
        let srns: Vec<_> = filter.apply(&records).iter().map(|c| c.srn.as_str()).collect();
        assert_eq!(srns, ["PES1UG20CS001", "PES1UG20CS002"]);
    }

    #[test]
    fn event_filter_is_case_insensitive_substring() {
        let records = sample();
        let filter = CertificateFilter::new("", "code fest");
        assert_eq!(filter.apply(&records).len(), 2);
    }

    #[test]
    fn filters_combine_with_and() {
        let records = sample();
        let filter = CertificateFilter::new("pes2", "CODE");
        let matched = filter.apply(&records);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].srn, "PES2UG21EC010");
    }

    #[test]
    fn event_filter_does_not_collapse_whitespace() {
        let records = sample();
        let filter = CertificateFilter::new("", "codefest");
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn clear_restores_everything() {
        let records = sample();
        let mut filter = CertificateFilter::new("nothing-matches", "xyz");
        assert!(filter.apply(&records).is_empty());
        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&records).len(), records.len());
    }
}
