//! # In-Memory Certificate Store
//!
//! Used when `DATABASE_URL` is not set (development and tests). Records keep
//! their insertion order, which stands in for the store's natural order when
//! several records match a lookup.
//!
//! All operations are synchronous: the `parking_lot::RwLock` is never held
//! across an `.await`.

use std::path::Path;
use std::sync::Arc;

use certview_core::{
    sort_newest_first, Certificate, CertificateAddress, CertificateStats, EventPattern,
};
use parking_lot::RwLock;
use thiserror::Error;

/// Errors loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("failed to read fixtures from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The file is not a JSON array of certificates.
    #[error("failed to parse fixtures from {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Thread-safe, cloneable in-memory certificate collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<Certificate>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records` in the given order.
    pub fn with_records(records: Vec<Certificate>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Load a JSON array of certificates from `path`.
    pub fn from_fixture_file(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<Certificate> =
            serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::with_records(records))
    }

    /// Append a record. Only fixtures and tests call this; the API exposes
    /// no write path.
    pub fn insert(&self, record: Certificate) {
        self.records.write().push(record);
    }

    /// Every record, newest first.
    pub fn list_all(&self) -> Vec<Certificate> {
        let mut records = self.records.read().clone();
        sort_newest_first(&mut records);
        records
    }

    /// Records whose `srn` equals `srn`, newest first.
    pub fn list_by_srn(&self, srn: &str) -> Vec<Certificate> {
        let mut records: Vec<Certificate> = self
            .records
            .read()
            .iter()
            .filter(|c| c.srn == srn)
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        records
    }

    /// First record in insertion order matching `srn` and `pattern`.
    pub fn find_by_event_pattern(&self, srn: &str, pattern: &EventPattern) -> Option<Certificate> {
        self.records
            .read()
            .iter()
            .find(|c| pattern.matches(srn, c))
            .cloned()
    }

    /// First record in insertion order living at `address`.
    pub fn find_by_address(&self, address: &CertificateAddress) -> Option<Certificate> {
        certview_core::find_by_address(self.records.read().iter(), address).cloned()
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> CertificateStats {
        CertificateStats::from_records(&self.records.read())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::io::Write;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn cert(srn: &str, event: &str, secs: i64) -> Certificate {
        Certificate::new(srn, event, "https://img.example/c.png", at(secs))
    }

    #[test]
    fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn list_all_is_newest_first() {
        let store = MemoryStore::with_records(vec![
            cert("A", "E1", 10),
            cert("B", "E2", 30),
            cert("C", "E3", 20),
        ]);
        let srns: Vec<_> = store.list_all().into_iter().map(|c| c.srn).collect();
        assert_eq!(srns, ["B", "C", "A"]);
    }

    #[test]
    fn list_by_srn_filters_exactly() {
        let store = MemoryStore::with_records(vec![
            cert("A", "E1", 10),
            cert("a", "E2", 20),
            cert("A", "E3", 30),
        ]);
        let events: Vec<_> = store.list_by_srn("A").into_iter().map(|c| c.event).collect();
        assert_eq!(events, ["E3", "E1"]);
    }

    #[test]
    fn find_by_event_pattern_returns_first_inserted_match() {
        let store = MemoryStore::with_records(vec![
            cert("A", "Code Fest", 50),
            cert("A", "CODE FEST", 10),
        ]);
        let pattern = EventPattern::new("codefest").unwrap();
        let found = store.find_by_event_pattern("A", &pattern).unwrap();
        assert_eq!(found.event, "Code Fest");
    }

    #[test]
    fn find_by_address_misses_on_other_srn() {
        let store = MemoryStore::with_records(vec![cert("A", "Code Fest", 10)]);
        let address = CertificateAddress::new(Some("B"), Some("codefest")).unwrap();
        assert!(store.find_by_address(&address).is_none());
    }

    #[test]
    fn clones_share_records() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.insert(cert("A", "E", 1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn loads_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let records = vec![cert("A", "Code Fest", 1), cert("B", "Ideathon", 2)];
        write!(file, "{}", serde_json::to_string(&records).unwrap()).unwrap();

        let store = MemoryStore::from_fixture_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn rejects_malformed_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        let err = MemoryStore::from_fixture_file(file.path()).unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
    }

    #[test]
    fn missing_fixture_file_is_io_error() {
        let err = MemoryStore::from_fixture_file(Path::new("/nonexistent/certs.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
