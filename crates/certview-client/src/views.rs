//! # View Models
//!
//! Rendering-independent state for the three pages: the certificate
//! gallery, the single-certificate detail page, and the home counters.

use std::fmt;

use certview_core::{Certificate, CertificateAddress, CertificateFilter, CertificateStats};

use crate::retrieval::{self, Strategy};
use crate::CertificateClient;

/// Placeholder for a missing student name.
pub const MISSING_NAME: &str = "N/A";
/// Placeholder for a missing event name.
pub const MISSING_EVENT: &str = "No Event Name";
/// Shown when the filters exclude every certificate.
pub const NO_RESULTS: &str = "No certificates found matching your search criteria.";

/// The certificate gallery: the fetched set and the active filters.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    certificates: Vec<Certificate>,
    filter: CertificateFilter,
    load_error: Option<String>,
}

/// One displayable gallery row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryRow<'a> {
    pub student_name: &'a str,
    pub srn: &'a str,
    pub event: &'a str,
    pub achievement: Option<&'a str>,
    /// `/certificate/{srn}/{slug}`, or `None` when the row is not navigable.
    pub link: Option<String>,
}

impl Gallery {
    /// Build a gallery over `records`, dropping records with a blank event.
    pub fn from_records(records: Vec<Certificate>) -> Self {
        let certificates: Vec<Certificate> =
            records.into_iter().filter(Certificate::has_event).collect();
        Self {
            certificates,
            ..Self::default()
        }
    }

    /// Fetch the listing. A failed fetch yields an empty gallery carrying
    /// the error for display.
    pub async fn load(client: &CertificateClient) -> Self {
        match client.list_certificates().await {
            Ok(records) => Self::from_records(records),
            Err(e) => {
                tracing::error!("Error fetching certificates: {e}");
                Self {
                    load_error: Some(e.to_string()),
                    ..Self::default()
                }
            }
        }
    }

    /// Why the listing failed to load, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Replace both filter queries.
    pub fn set_filter(&mut self, srn: impl Into<String>, event: impl Into<String>) {
        self.filter = CertificateFilter::new(srn, event);
    }

    /// Clear both filter queries.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// The active filter.
    pub fn filter(&self) -> &CertificateFilter {
        &self.filter
    }

    /// Every loaded certificate.
    pub fn all(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Certificates passing the active filter, in listing order.
    pub fn visible(&self) -> Vec<&Certificate> {
        self.filter.apply(&self.certificates)
    }

    /// Rows for the visible certificates.
    pub fn rows(&self) -> Vec<GalleryRow<'_>> {
        self.visible().into_iter().map(row).collect()
    }

    /// `Showing X of Y certificates`.
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} certificates",
            self.visible().len(),
            self.certificates.len()
        )
    }
}

fn row(certificate: &Certificate) -> GalleryRow<'_> {
    GalleryRow {
        student_name: certificate
            .student_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(MISSING_NAME),
        srn: certificate.srn.as_str(),
        event: if certificate.event.is_empty() {
            MISSING_EVENT
        } else {
            certificate.event.as_str()
        },
        achievement: certificate.achievement.as_deref().filter(|a| !a.is_empty()),
        link: CertificateAddress::for_certificate(certificate).map(|a| a.path()),
    }
}

/// Why a detail page shows no certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    /// The address lacked a student id or slug.
    InvalidUrl,
    /// No certificate lives at the address.
    NotFound,
    /// The listing could not be fetched.
    LoadFailed,
}

impl fmt::Display for DetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidUrl => "Invalid certificate URL",
            Self::NotFound => "Certificate not found",
            Self::LoadFailed => "Failed to load certificate. Please check if the certificate exists.",
        })
    }
}

/// State of the single-certificate page. Exactly one state holds at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Loading,
    Error(DetailError),
    Loaded(Box<Certificate>),
}

impl DetailState {
    /// Resolve the page for possibly-absent URL parameters.
    ///
    /// Missing parameters short-circuit to [`DetailError::InvalidUrl`]
    /// without a request.
    pub async fn load(
        client: &CertificateClient,
        srn: Option<&str>,
        slug: Option<&str>,
        strategy: Strategy,
    ) -> Self {
        let address = match CertificateAddress::new(srn, slug) {
            Ok(address) => address,
            Err(_) => return Self::Error(DetailError::InvalidUrl),
        };

        match retrieval::retrieve(client, &address, strategy).await {
            Ok(Some(certificate)) => Self::Loaded(Box::new(certificate)),
            Ok(None) => Self::Error(DetailError::NotFound),
            Err(e) => {
                tracing::error!("Failed to fetch certificate: {e}");
                Self::Error(DetailError::LoadFailed)
            }
        }
    }

    /// The loaded certificate, if any.
    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            Self::Loaded(certificate) => Some(&**certificate),
            _ => None,
        }
    }
}

/// The three home-page counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeCounters {
    pub certificates_issued: u64,
    pub students_recognized: u64,
    pub events_covered: u64,
}

impl From<&CertificateStats> for HomeCounters {
    fn from(stats: &CertificateStats) -> Self {
        Self {
            certificates_issued: stats.total_certificates,
            students_recognized: stats.total_students,
            events_covered: stats.total_events,
        }
    }
}

impl HomeCounters {
    /// Fetch statistics. A failed fetch is logged and leaves every counter at zero.
    pub async fn load(client: &CertificateClient) -> Self {
        match client.stats().await {
            Ok(stats) => Self::from(&stats),
            Err(e) => {
                tracing::error!("Error fetching stats: {e}");
                Self::default()
            }
        }
    }

    /// Label/value pairs in display order.
    pub fn entries(&self) -> [(&'static str, u64); 3] {
        [
            ("Certificates Issued", self.certificates_issued),
            ("Students Recognized", self.students_recognized),
            ("Events Covered", self.events_covered),
        ]
    }
}
