//! # Single-Certificate Subcommands
//!
//! `find`, `show`, `download` and `share`. Addresses are given either as a
//! page path (`/certificate/PES1UG20CS001/codefest2025`) or as a student id
//! followed by a slug.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use certview_client::actions::{self, DownloadOutcome, WriterClipboard};
use certview_client::retrieval::Strategy;
use certview_client::views::{DetailError, DetailState};
use certview_client::CertificateClient;
use certview_core::{Certificate, CertificateAddress, CERTIFICATE_PATH_PREFIX};

use crate::output::certificate_block;
use crate::EXIT_NOT_FOUND;

/// Arguments for `certview find`.
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Student registration number, matched exactly.
    pub srn: String,

    /// Event name or fragment; case and whitespace are ignored.
    pub event: String,

    /// Print the record as JSON.
    #[arg(long)]
    pub json: bool,
}

/// A certificate address on the command line.
#[derive(Args, Debug)]
pub struct AddressArgs {
    /// A `/certificate/{srn}/{slug}` path, or a student id.
    pub target: String,

    /// Event slug, when `target` is a student id.
    pub slug: Option<String>,

    /// Resolve on the server instead of scanning the full listing.
    #[arg(long)]
    pub server: bool,
}

impl AddressArgs {
    /// The `(srn, slug)` parameters this address supplies, either of which
    /// may be missing.
    fn parameters(&self) -> (Option<String>, Option<String>) {
        if self.slug.is_none() && self.target.starts_with(CERTIFICATE_PATH_PREFIX) {
            return match CertificateAddress::from_path(&self.target) {
                Ok(address) => (
                    Some(address.srn().to_string()),
                    Some(address.slug().to_string()),
                ),
                Err(_) => (None, None),
            };
        }
        (Some(self.target.clone()), self.slug.clone())
    }

    fn strategy(&self) -> Strategy {
        if self.server {
            Strategy::Server
        } else {
            Strategy::Scan
        }
    }

    async fn load(&self, client: &CertificateClient) -> DetailState {
        let (srn, slug) = self.parameters();
        DetailState::load(client, srn.as_deref(), slug.as_deref(), self.strategy()).await
    }
}

/// Arguments for `certview show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub address: AddressArgs,

    /// Print the record as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `certview download`.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub address: AddressArgs,

    /// Directory to save into.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for `certview share`.
#[derive(Args, Debug)]
pub struct ShareArgs {
    /// A `/certificate/{srn}/{slug}` path, or a student id.
    pub target: String,

    /// Event name or slug, when `target` is a student id.
    pub slug: Option<String>,
}

/// Execute `certview find`.
pub async fn run_find(client: &CertificateClient, args: &FindArgs) -> Result<u8> {
    let found = client
        .find(&args.srn, &args.event)
        .await
        .with_context(|| format!("failed to look up {} / {}", args.srn, args.event))?;

    match found {
        Some(certificate) => {
            print_certificate(&certificate, args.json)?;
            Ok(0)
        }
        None => {
            eprintln!("{}", DetailError::NotFound);
            Ok(EXIT_NOT_FOUND)
        }
    }
}

/// Execute `certview show`.
pub async fn run_show(client: &CertificateClient, args: &ShowArgs) -> Result<u8> {
    match args.address.load(client).await {
        DetailState::Loaded(certificate) => {
            print_certificate(&certificate, args.json)?;
            Ok(0)
        }
        DetailState::Error(error) => Ok(report(&error)),
        DetailState::Loading => Ok(1),
    }
}

/// Execute `certview download`.
pub async fn run_download(client: &CertificateClient, args: &DownloadArgs) -> Result<u8> {
    let certificate = match args.address.load(client).await {
        DetailState::Loaded(certificate) => certificate,
        DetailState::Error(error) => return Ok(report(&error)),
        DetailState::Loading => return Ok(1),
    };

    match actions::download(client, &certificate, &args.dir).await {
        DownloadOutcome::Saved(path) => println!("Saved {}", path.display()),
        DownloadOutcome::OpenExternally(url) => {
            println!("Download failed; open the image instead: {url}");
        }
        DownloadOutcome::NothingToDownload => println!("This certificate has no image."),
    }
    Ok(0)
}

/// Execute `certview share`.
pub fn run_share(client: &CertificateClient, args: &ShareArgs) -> Result<u8> {
    let address = if args.slug.is_none() && args.target.starts_with(CERTIFICATE_PATH_PREFIX) {
        CertificateAddress::from_path(&args.target)
    } else {
        CertificateAddress::new(Some(&args.target), args.slug.as_deref())
    };
    let address = match address {
        Ok(address) => address,
        Err(e) => {
            eprintln!("{}: {e}", DetailError::InvalidUrl);
            return Ok(1);
        }
    };

    let mut clipboard = WriterClipboard(io::stdout());
    if let Some(confirmation) = actions::share(&mut clipboard, client.site_url(), &address) {
        eprintln!("{confirmation}");
    }
    Ok(0)
}

fn print_certificate(certificate: &Certificate, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(certificate)?);
    } else {
        println!("{}", certificate_block(certificate));
    }
    Ok(())
}

/// Print the detail error and return the matching exit status.
fn report(error: &DetailError) -> u8 {
    eprintln!("Certificate Not Found: {error}");
    match error {
        DetailError::NotFound => EXIT_NOT_FOUND,
        DetailError::InvalidUrl | DetailError::LoadFailed => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(target: &str, slug: Option<&str>) -> AddressArgs {
        AddressArgs {
            target: target.to_string(),
            slug: slug.map(String::from),
            server: false,
        }
    }

    #[test]
    fn parameters_from_page_path() {
        let (srn, slug) = address("/certificate/PES1UG20CS001/codefest2025", None).parameters();
        assert_eq!(srn.as_deref(), Some("PES1UG20CS001"));
        assert_eq!(slug.as_deref(), Some("codefest2025"));
    }

    #[test]
    fn parameters_from_srn_and_slug() {
        let (srn, slug) = address("PES1UG20CS001", Some("Code Fest 2025")).parameters();
        assert_eq!(srn.as_deref(), Some("PES1UG20CS001"));
        assert_eq!(slug.as_deref(), Some("Code Fest 2025"));
    }

    #[test]
    fn missing_slug_is_reported_as_missing() {
        let (srn, slug) = address("PES1UG20CS001", None).parameters();
        assert!(srn.is_some());
        assert!(slug.is_none());
    }

    #[test]
    fn malformed_page_path_has_no_parameters() {
        let (srn, slug) = address("/certificate/PES1UG20CS001", None).parameters();
        assert!(srn.is_none() && slug.is_none());
    }

    #[test]
    fn not_found_has_its_own_exit_code() {
        assert_eq!(report(&DetailError::NotFound), EXIT_NOT_FOUND);
        assert_eq!(report(&DetailError::InvalidUrl), 1);
        assert_eq!(report(&DetailError::LoadFailed), 1);
    }
}
