//! # certview-client -- Typed client for the certview API
//!
//! Provides typed access to the read-only certificate API plus the
//! presentation logic built on top of it:
//!
//! - [`CertificateClient`]: listing, lookup, slug resolution, statistics and
//!   raw image fetches.
//! - [`retrieval`]: resolving a `/certificate/{srn}/{slug}` address into a
//!   record, by default with a client-side scan over the full listing.
//! - [`views`]: gallery, detail and home view models.
//! - [`actions`]: download and share.
//!
//! Nothing here retries. A failed request surfaces once as a [`ClientError`].

pub mod actions;
pub mod config;
pub mod error;
pub mod retrieval;
pub mod views;

pub use config::ClientConfig;
pub use error::ClientError;

use certview_core::{Certificate, CertificateAddress, CertificateStats};
use serde::de::DeserializeOwned;
use url::Url;

/// Typed client for the certview REST API.
#[derive(Debug, Clone)]
pub struct CertificateClient {
    http: reqwest::Client,
    api_url: Url,
    site_url: Url,
}

impl CertificateClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        Ok(Self {
            http,
            api_url: config.api_url,
            site_url: config.site_url,
        })
    }

    /// Base URL of the public site.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// List every certificate, newest first.
    ///
    /// Calls `GET {api_url}/api/certificates`.
    pub async fn list_certificates(&self) -> Result<Vec<Certificate>, ClientError> {
        let url = self.endpoint_url(&["api", "certificates"])?;
        self.get_json("GET /api/certificates".into(), url).await
    }

    /// List one student's certificates, newest first.
    ///
    /// Calls `GET {api_url}/api/certificates/student/{srn}`.
    pub async fn list_for_student(&self, srn: &str) -> Result<Vec<Certificate>, ClientError> {
        let url = self.endpoint_url(&["api", "certificates", "student", srn])?;
        self.get_json(format!("GET /api/certificates/student/{srn}"), url)
            .await
    }

    /// Look up a certificate by student id and (loosely matched) event name.
    ///
    /// Calls `GET {api_url}/api/certificates/{srn}/{event}`. Returns
    /// `Ok(None)` on 404.
    pub async fn find(&self, srn: &str, event: &str) -> Result<Option<Certificate>, ClientError> {
        let url = self.endpoint_url(&["api", "certificates", srn, event])?;
        self.get_optional_json(format!("GET /api/certificates/{srn}/{event}"), url)
            .await
    }

    /// Resolve a certificate address on the server.
    ///
    /// Calls `GET {api_url}/api/resolve/{srn}/{slug}`. Returns `Ok(None)` on 404.
    pub async fn resolve(
        &self,
        address: &CertificateAddress,
    ) -> Result<Option<Certificate>, ClientError> {
        let srn = address.srn();
        let slug = address.slug().as_str();
        let url = self.endpoint_url(&["api", "resolve", srn, slug])?;
        self.get_optional_json(format!("GET /api/resolve/{srn}/{slug}"), url)
            .await
    }

    /// Fetch aggregate statistics.
    ///
    /// Calls `GET {api_url}/api/stats`.
    pub async fn stats(&self) -> Result<CertificateStats, ClientError> {
        let url = self.endpoint_url(&["api", "stats"])?;
        self.get_json("GET /api/stats".into(), url).await
    }

    /// Fetch the raw bytes at `image_url`. Any non-2xx status is an error.
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, ClientError> {
        let endpoint = format!("GET {image_url}");
        let resp = self
            .http
            .get(image_url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(ClientError::Api {
                endpoint,
                status,
                body: String::new(),
            });
        }

        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ClientError::Http {
                endpoint,
                source: e,
            })
    }

    /// `api_url` with `segments` appended, each percent-encoded.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                config::ConfigError::InvalidUrl(self.api_url.to_string(), "not a base URL".into())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: String,
        url: Url,
    ) -> Result<T, ClientError> {
        let resp = self.send(&endpoint, url).await?;
        decode(endpoint, resp).await
    }

    /// Like `get_json`, but a 404 is `Ok(None)`.
    async fn get_optional_json<T: DeserializeOwned>(
        &self,
        endpoint: String,
        url: Url,
    ) -> Result<Option<T>, ClientError> {
        let resp = self.send(&endpoint, url).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(endpoint, resp).await.map(Some)
    }

    async fn send(&self, endpoint: &str, url: Url) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(%endpoint, "calling certview API");
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: String,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            endpoint,
            status,
            body,
        });
    }

    resp.json()
        .await
        .map_err(|e| ClientError::Deserialization {
            endpoint,
            source: e,
        })
}
