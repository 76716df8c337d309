//! # Detail Page Actions
//!
//! Download saves the certificate image under a name derived from the event.
//! When the image cannot be fetched or saved, the caller is told to open the
//! image URL instead. Share writes the page URL to a clipboard sink.

use std::io::Write;
use std::path::{Path, PathBuf};

use certview_core::{download_file_name, Certificate, CertificateAddress};
use url::Url;

use crate::{CertificateClient, ClientError};

/// Confirmation reported after a successful share.
pub const SHARE_CONFIRMATION: &str = "Certificate URL copied to clipboard!";

/// Result of [`download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was written to this path.
    Saved(PathBuf),
    /// The image could not be saved; open this URL instead.
    OpenExternally(String),
    /// The record has no image URL.
    NothingToDownload,
}

/// Download `certificate`'s image into `dir`.
///
/// The file is named `{event}_Certificate.png` with whitespace runs in the
/// event name replaced by `_`. Any failure falls back to
/// [`DownloadOutcome::OpenExternally`].
pub async fn download(
    client: &CertificateClient,
    certificate: &Certificate,
    dir: &Path,
) -> DownloadOutcome {
    let image_url = certificate.image_url.trim();
    if image_url.is_empty() {
        return DownloadOutcome::NothingToDownload;
    }

    let target = dir.join(download_file_name(&certificate.event));
    match save_image(client, image_url, &target).await {
        Ok(()) => {
            tracing::info!(path = %target.display(), "certificate saved");
            DownloadOutcome::Saved(target)
        }
        Err(e) => {
            tracing::warn!("Download failed, falling back to opening the image URL: {e}");
            DownloadOutcome::OpenExternally(image_url.to_string())
        }
    }
}

async fn save_image(
    client: &CertificateClient,
    image_url: &str,
    target: &Path,
) -> Result<(), ClientError> {
    let bytes = client.fetch_image(image_url).await?;
    tokio::fs::write(target, bytes)
        .await
        .map_err(|source| ClientError::Io {
            path: target.display().to_string(),
            source,
        })
}

/// The public URL of the page at `address`.
pub fn share_url(site_url: &Url, address: &CertificateAddress) -> String {
    format!(
        "{}{}",
        site_url.as_str().trim_end_matches('/'),
        address.path()
    )
}

/// Destination for shared text.
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> std::io::Result<()>;
}

/// A clipboard that writes each shared text as a line to a writer.
#[derive(Debug)]
pub struct WriterClipboard<W>(pub W);

impl<W: Write> ClipboardSink for WriterClipboard<W> {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.0, "{text}")?;
        self.0.flush()
    }
}

/// Copy the share URL for `address` to `sink`.
///
/// Returns the confirmation to show, or `None` when the sink failed (the
/// failure is logged and otherwise ignored).
pub fn share(
    sink: &mut dyn ClipboardSink,
    site_url: &Url,
    address: &CertificateAddress,
) -> Option<&'static str> {
    let url = share_url(site_url, address);
    match sink.write_text(&url) {
        Ok(()) => Some(SHARE_CONFIRMATION),
        Err(e) => {
            tracing::error!("Failed to copy URL: {e}");
            None
        }
    }
}
