//! # Certificate Statistics
//!
//! Aggregate counts served by `/api/stats` and shown on the home page.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::certificate::{sort_newest_first, Certificate};

/// Number of records in [`CertificateStats::recent_certificates`].
pub const RECENT_LIMIT: usize = 5;

/// Aggregate statistics over the whole store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CertificateStats {
    /// Number of records.
    pub total_certificates: u64,
    /// Number of distinct `srn` values.
    pub total_students: u64,
    /// Number of distinct `event` values (exact text, not slugs).
    pub total_events: u64,
    /// The most recently created records, newest first.
    #[serde(default)]
    pub recent_certificates: Vec<Certificate>,
}

impl CertificateStats {
    /// Compute statistics over an in-memory record set.
    pub fn from_records(records: &[Certificate]) -> Self {
        let students: HashSet<&str> = records.iter().map(|c| c.srn.as_str()).collect();
        let events: HashSet<&str> = records.iter().map(|c| c.event.as_str()).collect();

        let mut recent = records.to_vec();
        sort_newest_first(&mut recent);
        recent.truncate(RECENT_LIMIT);

        Self {
            total_certificates: records.len() as u64,
            total_students: students.len() as u64,
            total_events: events.len() as u64,
            recent_certificates: recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn cert(srn: &str, event: &str, secs: i64) -> Certificate {
        Certificate::new(srn, event, "u", Utc.timestamp_opt(secs, 0).single().unwrap())
    }

    #[test]
    fn empty_store_has_zero_stats() {
        let stats = CertificateStats::from_records(&[]);
        assert_eq!(stats.total_certificates, 0);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.total_events, 0);
        assert!(stats.recent_certificates.is_empty());
    }

    #[test]
    fn counts_distinct_students_and_events() {
        let records = vec![
            cert("A", "Code Fest", 1),
            cert("A", "Ideathon", 2),
            cert("B", "Code Fest", 3),
            cert("B", "code fest", 4),
        ];
        let stats = CertificateStats::from_records(&records);
        assert_eq!(stats.total_certificates, 4);
        assert_eq!(stats.total_students, 2);
        // Distinct on exact text: "code fest" differs from "Code Fest".
        assert_eq!(stats.total_events, 3);
    }

    #[test]
    fn recent_is_newest_five() {
        let records: Vec<_> = (0..8).map(|i| cert("S", "E", i)).collect();
        let stats = CertificateStats::from_records(&records);
        let times: Vec<i64> = stats
            .recent_certificates
            .iter()
            .map(|c| c.created_at.timestamp())
            .collect();
        assert_eq!(times, [7, 6, 5, 4, 3]);
    }

    #[test]
    fn serializes_camel_case() {
        let stats = CertificateStats::from_records(&[cert("A", "E", 1)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalCertificates"], 1);
        assert_eq!(json["totalStudents"], 1);
        assert_eq!(json["totalEvents"], 1);
        assert_eq!(json["recentCertificates"].as_array().unwrap().len(), 1);
    }
}
