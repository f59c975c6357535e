use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, trace};

pub mod model;

pub use model::ScreenshotRecord;

/// File name of the collection inside the data directory
pub const COLLECTION_FILE: &str = "screenshots.json";

/// Errors produced by the screenshot store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file missing, unreadable, or holding malformed JSON
    #[error("error reading screenshots: {0}")]
    Read(String),

    /// Read or write step of a save failed (permissions, disk full,
    /// serialization failure)
    #[error("error saving screenshot: {0}")]
    Write(String),
}

/// Durable, ordered, append-only collection of [`ScreenshotRecord`]s backed
/// by a single JSON file.
///
/// The store keeps no collection state in memory between calls; every
/// operation reads the file afresh, so the durable representation is the
/// only source of truth. Appends through one store handle are serialized by
/// an internal lock. Separate store instances over the same file (e.g. two
/// processes) are not coordinated and race last-writer-wins.
pub struct ScreenshotStore {
    data_dir: PathBuf,
    collection_file: PathBuf,
    append_guard: Mutex<()>,
}

impl ScreenshotStore {
    /// Creates a store over the given data directory. The collection lives
    /// in `<data_dir>/screenshots.json` and is materialized by
    /// [`initialize`](Self::initialize).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let collection_file = data_dir.join(COLLECTION_FILE);
        debug!("Creating ScreenshotStore over {}", collection_file.display());
        Self {
            data_dir,
            collection_file,
            append_guard: Mutex::new(()),
        }
    }

    /// Path of the backing collection file
    pub fn collection_file(&self) -> &Path {
        &self.collection_file
    }

    /// Ensures the data directory and collection file exist.
    ///
    /// A missing collection file is seeded with an empty JSON array. Safe to
    /// call on every process start; existing contents are never touched.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            StorageError::Write(format!(
                "failed to create data directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        if !self.collection_file.exists() {
            fs::write(&self.collection_file, "[]").map_err(|e| {
                StorageError::Write(format!(
                    "failed to seed collection file {}: {}",
                    self.collection_file.display(),
                    e
                ))
            })?;
            info!(
                "Created empty screenshot collection at {}",
                self.collection_file.display()
            );
        } else {
            trace!(
                "Collection file {} already present",
                self.collection_file.display()
            );
        }

        Ok(())
    }

    /// Returns the full collection in stored (append) order.
    ///
    /// # Returns
    /// * `Ok(records)` - every persisted record, oldest first
    /// * `Err(StorageError::Read)` - file missing, unreadable, or malformed
    pub async fn list(&self) -> Result<Vec<ScreenshotRecord>, StorageError> {
        let records = self.read_collection()?;
        debug!("Read {} screenshot(s) from collection", records.len());
        Ok(records)
    }

    /// Appends a new screenshot to the collection and returns the stored
    /// record.
    ///
    /// Reads the full collection, pushes a freshly constructed record, and
    /// writes the whole collection back. The id is the capture time in
    /// milliseconds, bumped past the newest stored id so rapid successive
    /// appends still get distinct ids. The read-modify-write sequence holds
    /// an internal lock, so concurrent appends through this handle all
    /// survive.
    ///
    /// # Arguments
    /// * `title` - caller-supplied label
    /// * `image_data` - inline image payload, stored verbatim
    ///
    /// # Returns
    /// * `Ok(record)` - the record as persisted
    /// * `Err(StorageError::Write)` - the read or the write step failed
    pub async fn append(
        &self,
        title: &str,
        image_data: &str,
    ) -> Result<ScreenshotRecord, StorageError> {
        let _guard = self.append_guard.lock().await;

        let mut records = self
            .read_collection()
            .map_err(|e| StorageError::Write(e.to_string()))?;

        let record = ScreenshotRecord {
            id: next_id(&records),
            title: title.to_string(),
            image_data: image_data.to_string(),
            created_at: Utc::now(),
        };

        records.push(record.clone());
        self.write_collection(&records)?;

        info!(
            "Appended screenshot {} ('{}'), collection now holds {}",
            record.id,
            record.title,
            records.len()
        );
        Ok(record)
    }

    fn read_collection(&self) -> Result<Vec<ScreenshotRecord>, StorageError> {
        let raw = fs::read_to_string(&self.collection_file).map_err(|e| {
            StorageError::Read(format!(
                "failed to read {}: {}",
                self.collection_file.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Read(format!(
                "malformed collection in {}: {}",
                self.collection_file.display(),
                e
            ))
        })
    }

    fn write_collection(&self, records: &[ScreenshotRecord]) -> Result<(), StorageError> {
        // Pretty-printed to keep the file human-inspectable; not contractual.
        let body = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::Write(format!("failed to serialize collection: {}", e)))?;

        fs::write(&self.collection_file, body).map_err(|e| {
            StorageError::Write(format!(
                "failed to write {}: {}",
                self.collection_file.display(),
                e
            ))
        })
    }
}

/// Next record id: epoch milliseconds, bumped past the newest stored id when
/// the clock has not advanced since the last append.
fn next_id(records: &[ScreenshotRecord]) -> i64 {
    let now = Utc::now().timestamp_millis();
    match records.last() {
        Some(last) if last.id >= now => last.id + 1,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn temp_store() -> Result<(tempfile::TempDir, ScreenshotStore)> {
        let dir = tempfile::tempdir()?;
        let store = ScreenshotStore::new(dir.path());
        Ok((dir, store))
    }

    #[tokio::test]
    async fn initialize_seeds_empty_collection() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;

        assert!(store.collection_file().exists());
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn initialize_is_idempotent() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;
        store.append("first.png", "data:image/png;base64,AA==").await?;

        // Repeated initialization must never touch existing contents.
        store.initialize().await?;
        store.initialize().await?;

        let records = store.list().await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "first.png");
        Ok(())
    }

    #[tokio::test]
    async fn append_assigns_unique_increasing_ids() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;

        for i in 0..5 {
            store
                .append(&format!("shot-{}.png", i), "data:image/png;base64,AA==")
                .await?;
        }

        let records = store.list().await?;
        assert_eq!(records.len(), 5);
        for (i, pair) in records.windows(2).enumerate() {
            assert!(
                pair[1].id > pair[0].id,
                "ids must be strictly increasing, got {} then {} at position {}",
                pair[0].id,
                pair[1].id,
                i
            );
        }
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.title, format!("shot-{}.png", i));
        }
        Ok(())
    }

    #[tokio::test]
    async fn append_round_trips_payload_verbatim() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;

        let payload = crate::utils::encode_data_uri("image/png", &[0x89, 0x50, 0x4e, 0x47]);
        let stored = store.append("capture 2024-01-05 10:12", &payload).await?;

        let records = store.list().await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, stored.id);
        assert_eq!(records[0].title, "capture 2024-01-05 10:12");
        assert_eq!(records[0].image_data, payload);
        assert_eq!(records[0].created_at, stored.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn list_fails_on_missing_file() -> Result<()> {
        let (_dir, store) = temp_store()?;
        // No initialize(): the backing file does not exist.
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StorageError::Read(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_fails_on_malformed_collection() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;
        fs::write(store.collection_file(), "{\"not\": \"an array\"")?;

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StorageError::Read(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_fails_on_truncated_collection() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;
        store.append("a.png", "data:image/png;base64,AA==").await?;

        // Chop the tail off the valid file; a partial result must never leak.
        let raw = fs::read_to_string(store.collection_file())?;
        fs::write(store.collection_file(), &raw[..raw.len() / 2])?;

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StorageError::Read(_)));
        Ok(())
    }

    #[tokio::test]
    async fn append_fails_as_write_error_when_uninitialized() -> Result<()> {
        let (_dir, store) = temp_store()?;
        // The read step of the read-modify-write fails, surfaced as Write.
        let err = store
            .append("a.png", "data:image/png;base64,AA==")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_appends_both_survive() -> Result<()> {
        let (_dir, store) = temp_store()?;
        store.initialize().await?;

        let (a, b) = futures::future::join(
            store.append("left.png", "data:image/png;base64,AA=="),
            store.append("right.png", "data:image/png;base64,BB=="),
        )
        .await;
        let a = a?;
        let b = b?;
        assert_ne!(a.id, b.id);

        let records = store.list().await?;
        assert_eq!(records.len(), 2, "serialized appends must both persist");
        Ok(())
    }
}
