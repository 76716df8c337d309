//! # Error Types
//!
//! Validation errors raised when building domain values from untrusted
//! input (URL path segments, query parameters, CLI arguments).

use thiserror::Error;

/// Validation failures for certificate identifiers and addresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The student identifier was absent, empty or whitespace-only.
    #[error("student identifier is required")]
    MissingSrn,

    /// The event name or slug was absent, empty or whitespace-only.
    #[error("event name is required")]
    MissingEvent,

    /// The event query has more significant characters than a lookup
    /// pattern accepts.
    #[error("event name is too long ({len} characters, at most {max})")]
    EventTooLong {
        /// Non-whitespace characters in the query.
        len: usize,
        /// The accepted maximum.
        max: usize,
    },

    /// A certificate path did not have the `/certificate/{srn}/{slug}` shape.
    #[error("invalid certificate path: \"{0}\" (expected /certificate/<srn>/<event-slug>)")]
    InvalidPath(String),
}
