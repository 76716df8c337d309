//! # certview-cli — Command-Line Front End
//!
//! Provides the `certview` command-line interface over the certview API.
//!
//! ## Subcommands
//!
//! - `certview list` — The gallery, with optional student-id and event filters.
//! - `certview student` — One student's certificates.
//! - `certview find` — Look up a certificate by student id and event name.
//! - `certview show` — Resolve a `/certificate/{srn}/{slug}` address.
//! - `certview download` — Save a certificate image.
//! - `certview share` — Print the shareable page URL.
//! - `certview stats` — Home-page counters and recent certificates.
//! - `certview slug` — Print the slug of an event name (offline).
//!
//! ## Exit codes
//!
//! `0` on success, `1` on failure, `2` when the requested certificate does
//! not exist.

pub mod browse;
pub mod certificate;
pub mod output;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use url::Url;

use certview_client::config::{DEFAULT_API_URL, DEFAULT_SITE_URL};
use certview_client::{CertificateClient, ClientConfig};

use crate::browse::{run_list, run_stats, run_student, ListArgs, StudentArgs};
use crate::certificate::{
    run_download, run_find, run_share, run_show, DownloadArgs, FindArgs, ShareArgs, ShowArgs,
};

/// Exit status when the requested certificate does not exist.
pub const EXIT_NOT_FOUND: u8 = 2;

/// certview — browse and retrieve certificates.
#[derive(Parser, Debug)]
#[command(name = "certview", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API and the public site live.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the certview API.
    #[arg(long, env = "CERTVIEW_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: Url,

    /// Base URL of the public site, used for share links.
    #[arg(long, env = "CERTVIEW_SITE_URL", default_value = DEFAULT_SITE_URL, global = true)]
    pub site_url: Url,

    /// Per-request timeout in seconds. Unset waits indefinitely.
    #[arg(long, env = "CERTVIEW_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Client configuration for these arguments.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            site_url: self.site_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List certificates, newest first, optionally filtered.
    List(ListArgs),

    /// List one student's certificates.
    Student(StudentArgs),

    /// Look up a certificate by student id and event name (case and spacing ignored).
    Find(FindArgs),

    /// Show the certificate at a `/certificate/{srn}/{slug}` address.
    Show(ShowArgs),

    /// Download a certificate image as `{Event}_Certificate.png`.
    Download(DownloadArgs),

    /// Print the shareable URL of a certificate page.
    Share(ShareArgs),

    /// Show certificate, student and event counts.
    Stats,

    /// Print the URL slug of an event name.
    Slug {
        /// Event name, e.g. "Code Fest 2025".
        event: String,
    },
}

/// Execute the parsed command line.
pub async fn run(cli: Cli) -> Result<u8> {
    if let Commands::Slug { event } = &cli.command {
        println!("{}", certview_core::EventSlug::from_event_name(event));
        return Ok(0);
    }

    let config = cli.connection.client_config();
    let client = CertificateClient::new(config).context("failed to build HTTP client")?;
    tracing::debug!(api_url = %cli.connection.api_url, "client ready");

    match &cli.command {
        Commands::List(args) => run_list(&client, args).await,
        Commands::Student(args) => run_student(&client, args).await,
        Commands::Find(args) => run_find(&client, args).await,
        Commands::Show(args) => run_show(&client, args).await,
        Commands::Download(args) => run_download(&client, args).await,
        Commands::Share(args) => run_share(&client, args),
        Commands::Stats => run_stats(&client).await,
        Commands::Slug { .. } => Ok(0),
    }
}
