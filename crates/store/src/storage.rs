//! Write-through persistence of the cart snapshot.
//!
//! The adapter stores the cart at a single fixed location as the full
//! JSON-serialized sequence of line items. Every save replaces the previous
//! snapshot whole; nothing is ever merged or appended.
//!
//! The trait is deliberately synchronous: the store's compute/write-through
//! phase must not suspend, so that phase stays atomic relative to other
//! mutations on the same thread.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

use cartwright_core::Cart;

/// Errors that can occur while loading or saving the cart snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the storage medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot could not be serialized or deserialized.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value persistence of the cart snapshot.
///
/// Implementations use `&self` with interior mutability so the store can
/// share them behind an `Arc`. `load` returns `Ok(None)` when no snapshot
/// was ever written; the caller treats that as an empty cart.
pub trait CartStorage: Send + Sync {
    /// Read the persisted snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium is unreadable or the snapshot does not
    /// parse. An absent snapshot is `Ok(None)`, not an error.
    fn load(&self) -> Result<Option<Cart>, StorageError>;

    /// Write the complete snapshot, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails; the previous
    /// snapshot is then still the authoritative one.
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;
}

/// Cart snapshot stored as a JSON file on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file-backed storage adapter at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path the snapshot lives at.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<Cart>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cart snapshot on disk");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec(cart)?;
        fs::write(&self.path, bytes)?;
        debug!(path = %self.path.display(), items = cart.len(), "cart snapshot written");
        Ok(())
    }
}

/// Cart snapshot held in memory.
///
/// Used by tests and ephemeral runs. The snapshot is kept in serialized
/// form so the same serde path is exercised as with [`FileStorage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw serialized snapshot, if any was written.
    #[must_use]
    pub fn raw_snapshot(&self) -> Option<String> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Cart>, StorageError> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StorageError::from)
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(cart)?;
        *self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(serialized);
        Ok(())
    }
}
