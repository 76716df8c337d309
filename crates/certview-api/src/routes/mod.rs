//! # Route Handlers
//!
//! | Prefix | Module |
//! |---|---|
//! | `/` and unknown paths | [`index`] |
//! | `/api/certificates/*`, `/api/resolve/*` | [`certificates`] |
//! | `/api/stats` | [`stats`] |

pub mod certificates;
pub mod index;
pub mod stats;
