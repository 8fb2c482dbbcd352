// crates/snapcheck-core/src/runtime/store.rs
// ============================================================================
// Module: Snapcheck Stores
// Description: File-backed and in-memory snapshot document stores.
// Purpose: Move documents to and from disk without corrupting fixtures.
// Dependencies: crate::core, tempfile
// ============================================================================

//! ## Overview
//! Stores load and save whole snapshot documents. The file store enforces a
//! byte limit before parsing and saves through a temp-file rename so a
//! crashed regeneration never leaves a torn fixture on disk. The in-memory
//! store backs tests and demos.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::core::document::DocumentError;
use crate::core::document::parse_document;
use crate::core::document::to_document_bytes;
use crate::core::record::SnapshotDocument;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum fixture size in bytes.
pub const DEFAULT_MAX_FIXTURE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by snapshot stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("fixture io error at {path}: {message}")]
    Io {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying io failure description.
        message: String,
    },
    /// The backing file failed document validation.
    #[error("fixture at {path} is invalid: {source}")]
    Document {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying document violation.
        source: DocumentError,
    },
    /// The store's shared state was unusable.
    #[error("snapshot store state error: {0}")]
    State(String),
}

// ============================================================================
// SECTION: Store Interface
// ============================================================================

/// Backend-agnostic snapshot document store.
pub trait SnapshotStore {
    /// Loads the stored document, `None` when nothing was recorded yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing state cannot be read or the
    /// stored document is invalid.
    fn load(&self) -> Result<Option<SnapshotDocument>, StoreError>;

    /// Saves the document, replacing any previous state atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the document cannot be persisted.
    fn save(&self, document: &SnapshotDocument) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: File Store
// ============================================================================

/// File-backed snapshot store for committed golden fixtures.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    /// Path of the fixture file.
    path: PathBuf,
    /// Maximum permitted fixture size in bytes.
    max_bytes: usize,
}

impl FileSnapshotStore {
    /// Creates a file store with the default size limit.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_limit(path, DEFAULT_MAX_FIXTURE_BYTES)
    }

    /// Creates a file store with an explicit size limit.
    #[must_use]
    pub fn with_limit(path: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_bytes,
        }
    }

    /// Returns the fixture path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps an io failure onto a store error at this path.
    fn io_error(&self, err: &std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<SnapshotDocument>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).map_err(|err| self.io_error(&err))?;
        let document =
            parse_document(&bytes, self.max_bytes).map_err(|source| StoreError::Document {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(document))
    }

    fn save(&self, document: &SnapshotDocument) -> Result<(), StoreError> {
        let bytes = to_document_bytes(document).map_err(|source| StoreError::Document {
            path: self.path.clone(),
            source,
        })?;
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(parent).map_err(|err| self.io_error(&err))?;
        std::io::Write::write_all(&mut staged, &bytes).map_err(|err| self.io_error(&err))?;
        staged.persist(&self.path).map_err(|err| StoreError::Io {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        Ok(())
    }
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory snapshot store for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemorySnapshotStore {
    /// Stored document protected by a mutex.
    document: Arc<Mutex<Option<SnapshotDocument>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<SnapshotDocument>, StoreError> {
        let guard = self
            .document
            .lock()
            .map_err(|_| StoreError::State("snapshot store mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, document: &SnapshotDocument) -> Result<(), StoreError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|_| StoreError::State("snapshot store mutex poisoned".to_string()))?;
        *guard = Some(document.clone());
        Ok(())
    }
}
