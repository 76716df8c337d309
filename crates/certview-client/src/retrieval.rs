//! # Certificate Retrieval
//!
//! Turns a shareable `(srn, slug)` address into a single record.
//!
//! The default strategy fetches the full listing and scans it, comparing
//! each record's normalized event name with the slug. Every detail view
//! therefore costs one full listing. [`Strategy::Server`] asks the API's
//! resolve endpoint instead, which applies the same comparison in the store.

use certview_core::{Certificate, CertificateAddress};

use crate::{CertificateClient, ClientError};

/// How an address is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Fetch every certificate and scan for the first match.
    #[default]
    Scan,
    /// Call `GET /api/resolve/{srn}/{slug}`.
    Server,
}

/// Resolve `address` with the given strategy.
pub async fn retrieve(
    client: &CertificateClient,
    address: &CertificateAddress,
    strategy: Strategy,
) -> Result<Option<Certificate>, ClientError> {
    match strategy {
        Strategy::Scan => {
            let records = client.list_certificates().await?;
            tracing::debug!(count = records.len(), %address, "scanning certificates");
            Ok(certview_core::find_by_address(&records, address).cloned())
        }
        Strategy::Server => client.resolve(address).await,
    }
}
