//! Client configuration.
//!
//! Two base URLs: the API the client calls, and the public site whose
//! `/certificate/{srn}/{slug}` pages are shared.

use std::time::Duration;

use url::Url;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5002";
/// Default public site URL.
pub const DEFAULT_SITE_URL: &str = "http://localhost:5173";

/// Configuration for [`CertificateClient`](crate::CertificateClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the certview API.
    pub api_url: Url,
    /// Base URL of the public site, used to build share links.
    pub site_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Configuration for an API at `api_url`, default site URL, no timeout.
    pub fn new(api_url: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url,
            site_url: parse_url("site_url", DEFAULT_SITE_URL)?,
            timeout: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CERTVIEW_API_URL` (default: `http://localhost:5002`)
    /// - `CERTVIEW_SITE_URL` (default: `http://localhost:5173`)
    /// - `CERTVIEW_TIMEOUT_SECS` (default: unset, no timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url_var = |var: &str, default: &str| {
            let raw = lookup(var).unwrap_or_else(|| default.to_string());
            parse_url(var, &raw)
        };

        let timeout = match lookup("CERTVIEW_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url: url_var("CERTVIEW_API_URL", DEFAULT_API_URL)?,
            site_url: url_var("CERTVIEW_SITE_URL", DEFAULT_SITE_URL)?,
            timeout,
        })
    }
}

pub(crate) fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "not a base URL".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for CERTVIEW_TIMEOUT_SECS: \"{0}\"")]
    InvalidTimeout(String),
}
