use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted screenshot entry.
///
/// Field names are camelCase on the wire and on disk (`imageData`,
/// `createdAt`), matching what the browser client sends and reads back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRecord {
    /// Unique, monotonically non-decreasing identifier derived from the
    /// capture time in milliseconds
    pub id: i64,

    /// Caller-supplied label, a filename or formatted capture time
    pub title: String,

    /// Inline image payload as a self-describing data URI; treated as an
    /// opaque string and never inspected
    pub image_data: String,

    /// Server-assigned creation timestamp, immutable once set
    pub created_at: DateTime<Utc>,
}
