//! Guest list store: the document file behind a write serializer.

use chrono::{DateTime, Utc};
use scarlet_guests::{GuestInput, GuestRecord, StoreDocument};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{DocumentFile, Result, StorageError, WriteSerializer};

/// Outcome of a mutation together with the document it produced.
#[derive(Debug, Clone)]
pub struct Committed<T> {
    /// The operation's result.
    pub value: T,
    /// The document after the operation.
    pub document: StoreDocument,
}

/// Guest list backed by a single JSON file.
///
/// Mutations are serialized; reads go straight to the file. One store should
/// own a given file for the lifetime of the process.
///
/// Each mutation runs on its own task, so it completes even when the caller
/// stops waiting for it.
#[derive(Debug)]
pub struct GuestStore {
    file: DocumentFile,
    writes: WriteSerializer,
}

impl GuestStore {
    /// Opens the store at `path`, creating the file if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = DocumentFile::new(path);
        file.ensure().await?;
        Ok(Self {
            file,
            writes: WriteSerializer::new(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the current document without taking the write lock.
    pub async fn snapshot(&self) -> Result<StoreDocument> {
        self.file.read().await
    }

    /// Creates a guest.
    pub async fn create(self: &Arc<Self>, input: GuestInput) -> Result<Committed<GuestRecord>> {
        self.mutate(move |document, now| {
            let guest = document.create(&input, now)?;
            Ok((guest, true))
        })
        .await
    }

    /// Updates guest `id`. A no-op update leaves the file untouched.
    pub async fn update(
        self: &Arc<Self>,
        id: u64,
        input: GuestInput,
    ) -> Result<Committed<GuestRecord>> {
        self.mutate(move |document, now| {
            let outcome = document.update(id, &input, now)?;
            Ok((outcome.guest, outcome.changed))
        })
        .await
    }

    /// Deletes guest `id`, returning the removed record.
    pub async fn delete(self: &Arc<Self>, id: u64) -> Result<Committed<GuestRecord>> {
        self.mutate(move |document, _| {
            let guest = document.delete(id)?;
            Ok((guest, true))
        })
        .await
    }

    /// Runs one read-modify-write cycle under the write lock.
    ///
    /// `op` returns its value and whether the document changed; unchanged
    /// documents are not written back.
    async fn mutate<T, F>(self: &Arc<Self>, op: F) -> Result<Committed<T>>
    where
        F: FnOnce(&mut StoreDocument, DateTime<Utc>) -> Result<(T, bool)> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            store
                .writes
                .with_write_lock(|| async {
                    let mut document = store.file.read().await?;
                    let (value, changed) = op(&mut document, Utc::now())?;
                    if changed {
                        store.file.write(&document).await?;
                    }
                    Ok::<_, StorageError>(Committed { value, document })
                })
                .await
        })
        .await?
    }
}
