//! # Certificate Records
//!
//! The canonical certificate record as stored and served. JSON uses
//! camelCase names with the store id under `_id`.
//!
//! ## Legacy field names
//!
//! An earlier schema named the same fields `eventName`, `certificateUrl`,
//! `issueDate` and `description`. Those names are accepted as aliases when
//! deserializing so old fixtures still load; serialization always emits the
//! canonical names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::EventSlug;

/// A certificate record.
///
/// `srn` + `event` is the natural lookup key, but nothing enforces its
/// uniqueness: several records may share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Store-assigned record id.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Student registration number.
    pub srn: String,
    /// Student display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Free-text event name. Missing values deserialize as `""`.
    #[serde(default, alias = "eventName")]
    pub event: String,
    /// Location of the certificate image.
    #[serde(alias = "certificateUrl")]
    pub image_url: String,
    /// Issue date.
    #[serde(default, alias = "issueDate", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Achievement or award text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
    /// Longer description of the project behind the certificate.
    #[serde(
        default,
        alias = "description",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_description: Option<String>,
    /// Verification columns, carried but never interpreted.
    #[serde(flatten)]
    pub verification: VerificationMetadata,
    /// When the record was created in the store.
    pub created_at: DateTime<Utc>,
    /// When the record was last written in the store.
    pub updated_at: DateTime<Utc>,
}

/// Schema columns reserved for on-chain verification.
///
/// Nothing in certview populates or reads these; they are passed through
/// unchanged so that records round-trip without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VerificationMetadata {
    /// Transaction reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// Verified flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Content-addressed storage reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_hash: Option<String>,
    /// Token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}

impl Certificate {
    /// Build a record with only the required fields set, stamped `created_at`.
    pub fn new(
        srn: impl Into<String>,
        event: impl Into<String>,
        image_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            srn: srn.into(),
            student_name: None,
            event: event.into(),
            image_url: image_url.into(),
            date: None,
            achievement: None,
            project_description: None,
            verification: VerificationMetadata::default(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Normalized slug of this record's event name.
    pub fn event_slug(&self) -> EventSlug {
        EventSlug::from_event_name(&self.event)
    }

    /// False when the event name is empty or whitespace-only.
    pub fn has_event(&self) -> bool {
        !self.event.trim().is_empty()
    }
}

/// Order records by creation time, newest first.
///
/// The sort is stable: records created at the same instant keep their
/// relative order.
pub fn sort_newest_first(records: &mut [Certificate]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
