//! Certificate queries.
//!
//! All functions take a `&PgPool` and read the `certificates` table. Nothing
//! here writes: rows are inserted by an external process.

use certview_core::{Certificate, CertificateStats, EventPattern, EventSlug, VerificationMetadata};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, srn, student_name, event, image_url, date, achievement, \
     project_description, transaction_hash, verified, ipfs_hash, token_id, \
     created_at, updated_at";

/// Every certificate, newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Certificate>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CertificateRow>(&format!(
        "SELECT {COLUMNS} FROM certificates ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CertificateRow::into_record).collect())
}

/// Certificates whose `srn` equals `srn`, newest first.
pub async fn list_by_srn(pool: &PgPool, srn: &str) -> Result<Vec<Certificate>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CertificateRow>(&format!(
        "SELECT {COLUMNS} FROM certificates WHERE srn = $1 ORDER BY created_at DESC"
    ))
    .bind(srn)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CertificateRow::into_record).collect())
}

/// First certificate (in creation order) with exactly `srn` whose event
/// matches `pattern` case-insensitively.
pub async fn find_by_event_pattern(
    pool: &PgPool,
    srn: &str,
    pattern: &EventPattern,
) -> Result<Option<Certificate>, sqlx::Error> {
    let row = sqlx::query_as::<_, CertificateRow>(&format!(
        "SELECT {COLUMNS} FROM certificates WHERE srn = $1 AND event ~* $2 \
         ORDER BY created_at, id LIMIT 1"
    ))
    .bind(srn)
    .bind(pattern.source())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(CertificateRow::into_record))
}

/// First certificate (in creation order) with exactly `srn` whose
/// whitespace-stripped, lower-cased event equals `slug`.
pub async fn find_by_slug(
    pool: &PgPool,
    srn: &str,
    slug: &EventSlug,
) -> Result<Option<Certificate>, sqlx::Error> {
    let row = sqlx::query_as::<_, CertificateRow>(&format!(
        "SELECT {COLUMNS} FROM certificates \
         WHERE srn = $1 AND lower(regexp_replace(event, '\\s', '', 'g')) = $2 \
         ORDER BY created_at, id LIMIT 1"
    ))
    .bind(srn)
    .bind(slug.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(CertificateRow::into_record))
}

/// Aggregate statistics.
pub async fn stats(pool: &PgPool) -> Result<CertificateStats, sqlx::Error> {
    let (total, students, events): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(DISTINCT srn), COUNT(DISTINCT event) FROM certificates",
    )
    .fetch_one(pool)
    .await?;

    let recent = sqlx::query_as::<_, CertificateRow>(&format!(
        "SELECT {COLUMNS} FROM certificates ORDER BY created_at DESC LIMIT $1"
    ))
    .bind(certview_core::RECENT_LIMIT as i64)
    .fetch_all(pool)
    .await?;

    Ok(CertificateStats {
        total_certificates: total.max(0) as u64,
        total_students: students.max(0) as u64,
        total_events: events.max(0) as u64,
        recent_certificates: recent.into_iter().map(CertificateRow::into_record).collect(),
    })
}

/// Number of rows, for the metrics gauge.
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM certificates")
        .fetch_one(pool)
        .await
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CertificateRow {
    id: Uuid,
    srn: String,
    student_name: Option<String>,
    event: String,
    image_url: String,
    date: Option<DateTime<Utc>>,
    achievement: Option<String>,
    project_description: Option<String>,
    transaction_hash: Option<String>,
    verified: Option<bool>,
    ipfs_hash: Option<String>,
    token_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CertificateRow {
    fn into_record(self) -> Certificate {
        Certificate {
            id: self.id,
            srn: self.srn,
            student_name: self.student_name,
            event: self.event,
            image_url: self.image_url,
            date: self.date,
            achievement: self.achievement,
            project_description: self.project_description,
            verification: VerificationMetadata {
                transaction_hash: self.transaction_hash,
                verified: self.verified,
                ipfs_hash: self.ipfs_hash,
                token_id: self.token_id,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
