//! # Middleware
//!
//! Request-level concerns applied around every handler.

pub mod metrics;
