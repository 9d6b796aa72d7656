//! The on-disk JSON document.

use scarlet_guests::{GuestRecord, StoreDocument};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::Result;

/// A JSON file holding one [`StoreDocument`].
///
/// Reads never fail on malformed content, only on I/O. Writes replace the
/// file atomically through a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    /// Creates a handle for the document at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and, if the file is absent, an empty document.
    pub async fn ensure(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }

        tracing::info!(path = %self.path.display(), "Initializing empty guest list");
        self.write(&StoreDocument::default()).await
    }

    /// Loads the document, repairing whatever is structurally wrong with it.
    ///
    /// A missing file reads as the empty document.
    pub async fn read(&self) -> Result<StoreDocument> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default())
            }
            Err(e) => return Err(e.into()),
        };
        Ok(decode_lossy(&raw, &self.path))
    }

    /// Replaces the file with `document`.
    pub async fn write(&self, document: &StoreDocument) -> Result<()> {
        let payload = serde_json::to_vec_pretty(document)?;
        let temp_path = self.temp_path();

        if let Err(e) = write_synced(&temp_path, &payload).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            guests = document.guests.len(),
            next_id = document.next_id,
            "Guest list written"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "guests.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
    }
}

async fn write_synced(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(payload).await?;
    file.sync_all().await
}

/// Decodes a document, coercing anything malformed to the empty shape.
///
/// Guest entries that do not parse, carry id 0 or `u64::MAX`, or repeat an
/// earlier id are dropped.
/// `nextId` falls back to 1 and is then raised above every surviving id.
fn decode_lossy(raw: &[u8], path: &Path) -> StoreDocument {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "Guest list is not valid JSON; using an empty list"
            );
            return StoreDocument::default();
        }
    };
    let Value::Object(mut map) = value else {
        tracing::warn!(path = %path.display(), "Guest list is not an object; using an empty list");
        return StoreDocument::default();
    };

    let mut seen = HashSet::new();
    let guests: Vec<GuestRecord> = match map.remove("guests") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<GuestRecord>(item) {
                Ok(guest) if guest.id == 0 || guest.id == u64::MAX => {
                    tracing::warn!(id = guest.id, "Dropping guest with out-of-range id");
                    None
                }
                Ok(guest) if seen.insert(guest.id) => Some(guest),
                Ok(guest) => {
                    tracing::warn!(id = guest.id, "Dropping guest with duplicate id");
                    None
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Dropping malformed guest entry");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!(path = %path.display(), "Guest list has malformed guests; using none");
            Vec::new()
        }
        None => Vec::new(),
    };

    let stored_next = map
        .get("nextId")
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)
        .unwrap_or(1);
    let above_max = guests
        .iter()
        .filter_map(|g| g.id.checked_add(1))
        .max()
        .unwrap_or(1);

    StoreDocument {
        next_id: stored_next.max(above_max),
        guests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GUEST: &str = r#"{"id":4,"name":"Ana","invitedBy":"Diogo","isPaid":false,"isConfirmed":true,"createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z"}"#;

    async fn read_raw(raw: &str) -> StoreDocument {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guests.json");
        std::fs::write(&path, raw).unwrap();
        DocumentFile::new(&path).read().await.unwrap()
    }

    #[tokio::test]
    async fn test_ensure_creates_directory_and_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("guests.json");
        let file = DocumentFile::new(&path);

        file.ensure().await.unwrap();

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({"nextId": 1, "guests": []}));
    }

    #[tokio::test]
    async fn test_ensure_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guests.json");
        std::fs::write(&path, format!(r#"{{"nextId":9,"guests":[{GUEST}]}}"#)).unwrap();

        let file = DocumentFile::new(&path);
        file.ensure().await.unwrap();

        let doc = file.read().await.unwrap();
        assert_eq!(doc.next_id, 9);
        assert_eq!(doc.guests.len(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let doc = DocumentFile::new(dir.path().join("absent.json"))
            .read()
            .await
            .unwrap();
        assert_eq!(doc, StoreDocument::default());
    }

    #[tokio::test]
    async fn test_read_repairs_garbage() {
        assert_eq!(read_raw("").await, StoreDocument::default());
        assert_eq!(read_raw("{not json").await, StoreDocument::default());
        assert_eq!(read_raw("[1, 2]").await, StoreDocument::default());
        assert_eq!(
            read_raw(r#"{"nextId": 5, "guests": "nope"}"#).await,
            StoreDocument {
                next_id: 5,
                guests: vec![]
            }
        );
    }

    #[tokio::test]
    async fn test_read_repairs_next_id_and_entries() {
        let doc = read_raw(&format!(
            r#"{{"nextId": -3, "guests": [{GUEST}, {{"id": "x"}}, {GUEST}]}}"#
        ))
        .await;
        assert_eq!(doc.guests.len(), 1);
        assert_eq!(doc.guests[0].id, 4);
        assert_eq!(doc.next_id, 5);

        let doc = read_raw(&format!(r#"{{"nextId": 2.5, "guests": [{GUEST}]}}"#)).await;
        assert_eq!(doc.next_id, 5);

        let doc = read_raw(r#"{"guests": []}"#).await;
        assert_eq!(doc.next_id, 1);
    }

    #[tokio::test]
    async fn test_read_drops_out_of_range_ids() {
        let max = GUEST.replace(r#""id":4"#, &format!(r#""id":{}"#, u64::MAX));
        let zero = GUEST.replace(r#""id":4"#, r#""id":0"#);
        let doc = read_raw(&format!(r#"{{"nextId":5,"guests":[{max},{zero},{GUEST}]}}"#)).await;
        assert_eq!(doc.guests.len(), 1);
        assert_eq!(doc.guests[0].id, 4);
        assert_eq!(doc.next_id, 5);
    }

    #[tokio::test]
    async fn test_read_keeps_exhausted_next_id() {
        let doc = read_raw(&format!(r#"{{"nextId":{},"guests":[]}}"#, u64::MAX)).await;
        assert_eq!(doc.next_id, u64::MAX);
    }

    #[tokio::test]
    async fn test_write_replaces_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guests.json");
        let file = DocumentFile::new(&path);
        file.ensure().await.unwrap();

        let doc: StoreDocument =
            serde_json::from_str(&format!(r#"{{"nextId":7,"guests":[{GUEST}]}}"#)).unwrap();
        file.write(&doc).await.unwrap();

        assert_eq!(file.read().await.unwrap(), doc);
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("guests.json")]);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let file = DocumentFile::new(dir.path().join("missing").join("guests.json"));
        let err = file.write(&StoreDocument::default()).await.unwrap_err();
        assert!(matches!(err, crate::StorageError::Io(_)));
    }
}
