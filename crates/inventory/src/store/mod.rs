//! JSON file collections.
//!
//! # Files
//!
//! - `users.json` - Account records (username, password digest, role)
//! - `products.json` - Product records
//!
//! Each file is one JSON array. Reads load the whole array; a missing,
//! unreadable or malformed file reads as an empty collection and the cause is
//! logged. Mutations refuse to start from a file that exists but does not
//! decode. Writes serialize the whole array to a sibling temp file, fsync it
//! and rename it over the original, so a failed write leaves the previous
//! contents in place.
//!
//! Each [`JsonFile`] carries a mutex that serializes its load-mutate-save
//! cycles. Two writers in one process cannot lose each other's changes;
//! separate processes still race at whole-file granularity.

pub mod accounts;
pub mod products;

use std::fs::{self, File};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use wardrobe_core::ProductId;

pub use accounts::AccountStore;
pub use products::ProductStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Collection could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unique key violation (username already taken).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Position outside the collection.
    #[error("no record at position {index} (collection has {len})")]
    OutOfRange {
        /// Requested 0-based position.
        index: usize,
        /// Collection length.
        len: usize,
    },

    /// No record with this id.
    #[error("not found: {0}")]
    NotFound(ProductId),

    /// A background writer did not run to completion.
    #[error("background worker failed: {0}")]
    Worker(String),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A collection of `T` persisted as one JSON array.
#[derive(Debug)]
pub struct JsonFile<T> {
    path: PathBuf,
    guard: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle for the collection at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
            _records: PhantomData,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the whole collection.
    ///
    /// Never fails: a missing file is an empty collection, and an unreadable
    /// or malformed file is logged and also read as empty.
    #[must_use]
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(records) => {
                debug!(path = %self.path.display(), count = records.len(), "Loaded collection");
                records
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Treating unreadable collection as empty");
                Vec::new()
            }
        }
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or writing fails. The previous file
    /// is left untouched in that case.
    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let _guard = self.lock();
        self.write(records)
    }

    /// Write `records` only if the backing file does not exist yet.
    ///
    /// Returns `true` when the file was created. Existence is the only check;
    /// a present-but-malformed file is left alone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn create_if_missing(&self, seed: impl FnOnce() -> Vec<T>) -> Result<bool, StoreError> {
        let _guard = self.lock();
        if self.exists() {
            return Ok(false);
        }
        self.write(&seed())?;
        Ok(true)
    }

    /// Run one load-mutate-save cycle under the collection's guard.
    ///
    /// `f` sees the freshly loaded collection. If it returns `Ok` the
    /// collection is written back; if it returns `Err` nothing is written.
    ///
    /// Unlike [`load`](Self::load), an unreadable or malformed file is an
    /// error here and `f` is not called, so records that failed to decode are
    /// never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or decoded, whatever
    /// `f` returns, or `StoreError` if the write fails.
    pub fn modify<R, E>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock();
        let mut records = self.try_load().inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Refusing to rewrite unreadable collection");
        })?;
        let out = f(&mut records)?;
        self.write(&records)?;
        Ok(out)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        Ok(serde_json::from_slice(strip_bom(&bytes))?)
    }

    fn write(&self, records: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        write_atomic(&self.path, &bytes)
    }
}

/// Drop a leading UTF-8 byte-order mark, which some editors add.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| StoreError::io(&parent, e))?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("collection");
    let tmp = parent.join(format!(
        ".{file_name}.tmp.{}.{}",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let result = write_then_rename(&tmp, path, bytes);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut f = File::create(tmp).map_err(|e| StoreError::io(tmp, e))?;
    f.write_all(bytes).map_err(|e| StoreError::io(tmp, e))?;
    f.sync_all().map_err(|e| StoreError::io(tmp, e))?;
    fs::rename(tmp, path).map_err(|e| StoreError::io(path, e))
}
