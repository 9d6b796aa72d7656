//! File-backed storage for the Scarlet Drive guest list.
//!
//! The whole list lives in one JSON document. [`DocumentFile`] reads it
//! (repairing malformed content) and replaces it atomically, [`WriteSerializer`]
//! runs mutations one at a time, and [`GuestStore`] ties both to the rules in
//! `scarlet-guests`:
//!
//! ```text
//! mutation: lock -> read -> apply rule -> write (if changed) -> unlock
//! read:     read
//! ```
//!
//! Readers never take the lock. Because writes go through a temporary file
//! and a rename, a reader sees either the old or the new document, never a
//! partial one.

mod error;
mod file;
mod serializer;
mod store;

pub use error::StorageError;
pub use file::DocumentFile;
pub use serializer::WriteSerializer;
pub use store::{Committed, GuestStore};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
