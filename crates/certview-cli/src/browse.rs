//! # Browse Subcommands
//!
//! `list`, `student` and `stats`: read-only views over many certificates.

use anyhow::{Context, Result};
use clap::Args;

use certview_client::views::{Gallery, HomeCounters};
use certview_client::CertificateClient;
use certview_core::CertificateAddress;

use crate::output::{counters_block, gallery_line};

/// Arguments for `certview list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Keep certificates whose student id contains this text (case-insensitive).
    #[arg(long)]
    pub srn: Option<String>,

    /// Keep certificates whose event name contains this text (case-insensitive).
    #[arg(long)]
    pub event: Option<String>,

    /// Print records as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `certview student`.
#[derive(Args, Debug)]
pub struct StudentArgs {
    /// Student registration number, matched exactly.
    pub srn: String,

    /// Print records as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute `certview list`.
pub async fn run_list(client: &CertificateClient, args: &ListArgs) -> Result<u8> {
    let mut gallery = Gallery::load(client).await;
    if let Some(error) = gallery.load_error() {
        eprintln!("Error fetching certificates: {error}");
        return Ok(1);
    }

    gallery.set_filter(
        args.srn.clone().unwrap_or_default(),
        args.event.clone().unwrap_or_default(),
    );

    if args.json {
        let visible = gallery.visible();
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(0);
    }

    let rows = gallery.rows();
    if rows.is_empty() {
        println!("{}", certview_client::views::NO_RESULTS);
    }
    for row in &rows {
        println!("{}", gallery_line(row));
    }
    println!("{}", gallery.summary());
    Ok(0)
}

/// Execute `certview student`.
pub async fn run_student(client: &CertificateClient, args: &StudentArgs) -> Result<u8> {
    let records = client
        .list_for_student(&args.srn)
        .await
        .with_context(|| format!("failed to list certificates for {}", args.srn))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(0);
    }

    if records.is_empty() {
        println!("No certificates for {}", args.srn);
    }
    for record in &records {
        let link = CertificateAddress::for_certificate(record)
            .map(|a| a.path())
            .unwrap_or_default();
        println!("{}\t{}", record.event, link);
    }
    Ok(0)
}

/// Execute `certview stats`.
pub async fn run_stats(client: &CertificateClient) -> Result<u8> {
    let stats = client.stats().await.context("failed to fetch statistics")?;
    println!("{}", counters_block(&HomeCounters::from(&stats)));

    if !stats.recent_certificates.is_empty() {
        println!();
        println!("Recent certificates:");
        for record in &stats.recent_certificates {
            println!(
                "  {}\t{}\t{}",
                record.created_at.format("%Y-%m-%d"),
                record.srn,
                record.event
            );
        }
    }
    Ok(0)
}
