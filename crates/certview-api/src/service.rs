//! # Certificate Query Service
//!
//! The read-only operations the routes expose, dispatched to whichever
//! store backs this process. Handlers never touch the store directly.

use std::sync::Arc;

use certview_core::{Certificate, CertificateAddress, CertificateStats, EventPattern};

use crate::db::{self, LazyPool, StoreError};
use crate::store::MemoryStore;

/// The store behind the service.
#[derive(Debug, Clone)]
pub enum Backend {
    /// In-process records.
    Memory(MemoryStore),
    /// PostgreSQL through a lazily established pool.
    Postgres(Arc<LazyPool>),
}

/// Read-only query service over the certificate store.
#[derive(Debug, Clone)]
pub struct CertificateService {
    backend: Backend,
}

impl CertificateService {
    /// Service over an explicit backend.
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Service over an in-memory store.
    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(Backend::Memory(store))
    }

    /// Service over PostgreSQL. Does not connect.
    pub fn postgres(pool: LazyPool) -> Self {
        Self::new(Backend::Postgres(Arc::new(pool)))
    }

    /// The backend, for health checks.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Every certificate, newest first.
    pub async fn list_all(&self) -> Result<Vec<Certificate>, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.list_all()),
            Backend::Postgres(pool) => Ok(db::certificates::list_all(pool.get().await?).await?),
        }
    }

    /// Certificates belonging to `srn`, newest first.
    pub async fn list_by_srn(&self, srn: &str) -> Result<Vec<Certificate>, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.list_by_srn(srn)),
            Backend::Postgres(pool) => {
                Ok(db::certificates::list_by_srn(pool.get().await?, srn).await?)
            }
        }
    }

    /// The first certificate with exactly `srn` whose event matches the
    /// whitespace-tolerant, case-insensitive pattern built from `event_query`.
    pub async fn find_by_event(
        &self,
        srn: &str,
        event_query: &str,
    ) -> Result<Option<Certificate>, StoreError> {
        if srn.trim().is_empty() {
            return Err(certview_core::ValidationError::MissingSrn.into());
        }
        let pattern = EventPattern::new(event_query)?;
        match &self.backend {
            Backend::Memory(store) => Ok(store.find_by_event_pattern(srn, &pattern)),
            Backend::Postgres(pool) => Ok(db::certificates::find_by_event_pattern(
                pool.get().await?,
                srn,
                &pattern,
            )
            .await?),
        }
    }

    /// The first certificate living at `address`.
    pub async fn resolve(
        &self,
        address: &CertificateAddress,
    ) -> Result<Option<Certificate>, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.find_by_address(address)),
            Backend::Postgres(pool) => Ok(db::certificates::find_by_slug(
                pool.get().await?,
                address.srn(),
                address.slug(),
            )
            .await?),
        }
    }

    /// Aggregate statistics.
    pub async fn stats(&self) -> Result<CertificateStats, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.stats()),
            Backend::Postgres(pool) => Ok(db::certificates::stats(pool.get().await?).await?),
        }
    }

    /// Number of stored certificates.
    pub async fn count(&self) -> Result<u64, StoreError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.len() as u64),
            Backend::Postgres(pool) => {
                let n = db::certificates::count(pool.get().await?).await?;
                Ok(n.max(0) as u64)
            }
        }
    }

    /// Confirm the store can serve queries.
    pub async fn check_ready(&self) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Memory(_) => Ok(()),
            Backend::Postgres(pool) => pool.ping().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn service() -> CertificateService {
        let at = |s| Utc.timestamp_opt(s, 0).single().unwrap();
        CertificateService::in_memory(MemoryStore::with_records(vec![
            Certificate::new("PES1", "Code Fest 2025", "u", at(10)),
            Certificate::new("PES1", "Ideathon", "u", at(20)),
            Certificate::new("PES2", "Code Fest 2025", "u", at(30)),
        ]))
    }

    #[tokio::test]
    async fn find_by_event_rejects_blank_inputs() {
        let svc = service();
        assert!(matches!(
            svc.find_by_event("PES1", "   ").await,
            Err(StoreError::Invalid(_))
        ));
        assert!(matches!(
            svc.find_by_event(" ", "codefest").await,
            Err(StoreError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn find_by_event_matches_loosely() {
        let svc = service();
        let found = svc.find_by_event("PES1", "CODE   fest").await.unwrap();
        assert_eq!(found.unwrap().event, "Code Fest 2025");
        assert!(svc.find_by_event("PES3", "codefest").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_uses_slug_equality() {
        let svc = service();
        let address = CertificateAddress::new(Some("PES2"), Some("codefest2025")).unwrap();
        assert_eq!(svc.resolve(&address).await.unwrap().unwrap().srn, "PES2");

        let partial = CertificateAddress::new(Some("PES2"), Some("codefest")).unwrap();
        assert!(svc.resolve(&partial).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn count_and_readiness_for_memory_backend() {
        let svc = service();
        assert_eq!(svc.count().await.unwrap(), 3);
        assert!(svc.check_ready().await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_postgres_surfaces_connect_error() {
        let svc = CertificateService::postgres(LazyPool::new(
            "postgres://certview@127.0.0.1:1/certview",
            1,
        ));
        assert!(matches!(svc.list_all().await, Err(StoreError::Connect(_))));
    }
}
