//! # Certificate Addresses
//!
//! A certificate is addressed by its student id and the slug of its event
//! name. The navigation path is `/certificate/{srn}/{slug}`, with each
//! segment percent-encoded: a slug keeps every non-whitespace character of
//! the event name, so `AI/ML Day` renders as `/certificate/{srn}/ai%2Fmlday`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::certificate::Certificate;
use crate::error::ValidationError;
use crate::slug::EventSlug;

/// Path prefix of single-certificate pages.
pub const CERTIFICATE_PATH_PREFIX: &str = "/certificate/";

/// Bytes escaped in a path segment: the URL path-segment set plus `%`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A validated `(srn, slug)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateAddress {
    srn: String,
    slug: EventSlug,
}

impl CertificateAddress {
    /// Build an address from possibly-absent URL parameters.
    ///
    /// The slug is normalized again, which leaves a well-formed slug
    /// unchanged and lets `CodeFest2025` address the same record as
    /// `codefest2025`.
    pub fn new(srn: Option<&str>, slug: Option<&str>) -> Result<Self, ValidationError> {
        let srn = srn
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingSrn)?;
        let slug = slug
            .map(EventSlug::from_event_name)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingEvent)?;
        Ok(Self {
            srn: srn.to_string(),
            slug,
        })
    }

    /// The address a gallery link points at, or `None` when the record has
    /// no usable event name and therefore is not link-navigable.
    pub fn for_certificate(certificate: &Certificate) -> Option<Self> {
        if !certificate.has_event() {
            return None;
        }
        Self::new(Some(&certificate.srn), Some(&certificate.event)).ok()
    }

    /// Parse a `/certificate/{srn}/{slug}` path, percent-decoding both
    /// segments.
    pub fn from_path(path: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidPath(path.to_string());
        let rest = path
            .strip_prefix(CERTIFICATE_PATH_PREFIX)
            .ok_or_else(invalid)?;
        let mut parts = rest.trim_end_matches('/').split('/');
        let srn = parts.next().map(decode_segment).transpose().map_err(|_| invalid())?;
        let slug = parts.next().map(decode_segment).transpose().map_err(|_| invalid())?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::new(srn.as_deref(), slug.as_deref())
    }

    /// Student id.
    pub fn srn(&self) -> &str {
        &self.srn
    }

    /// Event slug.
    pub fn slug(&self) -> &EventSlug {
        &self.slug
    }

    /// Navigation path, e.g. `/certificate/PES1UG20CS001/codefest2025`.
    pub fn path(&self) -> String {
        format!(
            "{CERTIFICATE_PATH_PREFIX}{}/{}",
            utf8_percent_encode(&self.srn, SEGMENT),
            utf8_percent_encode(self.slug.as_str(), SEGMENT)
        )
    }

    /// True when `certificate` lives at this address.
    pub fn matches(&self, certificate: &Certificate) -> bool {
        certificate.srn == self.srn && self.slug.matches_event(&certificate.event)
    }
}

fn decode_segment(segment: &str) -> Result<String, std::str::Utf8Error> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
}

impl std::fmt::Display for CertificateAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
