#![deny(missing_docs)]

//! # certview-core — Foundational Types for certview
//!
//! Every other crate in the workspace depends on this one; it depends on
//! nothing internal and performs no I/O.
//!
//! ## Design Principles
//!
//! 1. **One canonical record.** [`Certificate`] carries the canonical field
//!    names (`event`, `imageUrl`, `date`, `achievement`). Legacy names from
//!    the abandoned schema are accepted on input only.
//!
//! 2. **One normalization.** [`EventSlug`] is the sole way an event name is
//!    turned into its URL form. Gallery links, the client scan and the
//!    in-memory resolution all go through it. The PostgreSQL query mirrors
//!    it in SQL.
//!
//! 3. **Addresses are validated once.** A [`CertificateAddress`] can only be
//!    built from a non-blank student id and a non-blank slug; a missing part
//!    is a [`ValidationError`], never a silent "not found".
//!
//! ## Crate Policy
//!
//! - No dependencies on other `certview-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod certificate;
pub mod download;
pub mod error;
pub mod filter;
pub mod matching;
pub mod slug;
pub mod stats;

pub use address::{CertificateAddress, CERTIFICATE_PATH_PREFIX};
pub use certificate::{sort_newest_first, Certificate, VerificationMetadata};
pub use download::download_file_name;
pub use error::ValidationError;
pub use filter::CertificateFilter;
pub use matching::{find_by_address, EventPattern, MAX_EVENT_QUERY_CHARS};
pub use slug::EventSlug;
pub use stats::{CertificateStats, RECENT_LIMIT};
