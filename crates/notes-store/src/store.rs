//! Main store implementation for note operations.
//!
//! The `NoteStore` type owns every note and the id counter behind a single
//! mutex, so create/update/delete are serialized against each other and
//! against readers.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use notes_core::{NewNote, Note, NoteId, NotePatch, Page, PageRequest};
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::snapshot::{Restored, SnapshotFile};

/// Configuration for building a store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Snapshot file. `None` keeps notes in memory only.
    pub persistence_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `NOTES_PERSISTENCE_PATH` - Optional snapshot file path
    pub fn from_env() -> Self {
        let persistence_path = std::env::var_os("NOTES_PERSISTENCE_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self { persistence_path }
    }
}

/// State guarded by the store mutex.
#[derive(Debug)]
struct Inner {
    notes: BTreeMap<NoteId, Note>,
    next_id: NoteId,
}

impl Inner {
    fn empty() -> Self {
        Self {
            notes: BTreeMap::new(),
            next_id: NoteId::FIRST,
        }
    }

    fn allocate_id(&mut self) -> StoreResult<NoteId> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(StoreError::IdsExhausted)?;
        Ok(id)
    }
}

/// Authoritative collection of notes.
#[derive(Debug)]
pub struct NoteStore {
    inner: Mutex<Inner>,
    snapshot: Option<SnapshotFile>,
}

impl NoteStore {
    /// Create an empty store that keeps notes in memory only.
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Inner::empty()),
            snapshot: None,
        }
    }

    /// Open a store backed by a snapshot file, loading it if it exists.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let snapshot = SnapshotFile::new(path);
        let Restored { notes, next_id } = snapshot.load().await?;

        tracing::info!(
            path = %snapshot.path().display(),
            count = notes.len(),
            next_id = %next_id,
            "Loaded note snapshot"
        );

        Ok(Self {
            inner: Mutex::new(Inner { notes, next_id }),
            snapshot: Some(snapshot),
        })
    }

    /// Build a store from configuration.
    pub async fn from_config(config: StoreConfig) -> StoreResult<Self> {
        match config.persistence_path {
            Some(path) => Self::open(path).await,
            None => {
                tracing::debug!("Using in-memory note store");
                Ok(Self::in_memory())
            }
        }
    }

    /// Whether mutations are written to a snapshot file.
    pub fn is_persistent(&self) -> bool {
        self.snapshot.is_some()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Create a note from validated fields and assign it the next id.
    pub async fn create(&self, request: NewNote) -> StoreResult<Note> {
        let fields = request.validate()?;

        let mut inner = self.inner.lock().await;
        let id = inner.allocate_id()?;
        let note = Note::new(id, fields, Utc::now());
        inner.notes.insert(id, note.clone());

        if let Err(e) = self.persist(&inner).await {
            // The id stays consumed so it is never handed out twice.
            inner.notes.remove(&id);
            return Err(e);
        }

        Ok(note)
    }

    /// Get a note by id.
    pub async fn get(&self, id: NoteId) -> StoreResult<Note> {
        let inner = self.inner.lock().await;
        inner.notes.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Return one page of notes in ascending id order.
    ///
    /// A page past the end yields no items; `total` is always the size of
    /// the whole collection. Pages are positional, so reaching page `n`
    /// walks the `offset` notes before it.
    pub async fn list(&self, request: PageRequest) -> Page<Note> {
        let inner = self.inner.lock().await;
        let items = inner
            .notes
            .values()
            .skip(request.offset())
            .take(request.page_size() as usize)
            .cloned()
            .collect();

        Page {
            items,
            total: inner.notes.len(),
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    /// Apply a partial update. An empty patch only refreshes `updated_at`.
    pub async fn update(&self, id: NoteId, patch: NotePatch) -> StoreResult<Note> {
        patch.validate()?;

        let mut inner = self.inner.lock().await;
        let note = inner.notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let previous = note.clone();
        note.apply(patch, Utc::now());
        let updated = note.clone();

        if let Err(e) = self.persist(&inner).await {
            inner.notes.insert(id, previous);
            return Err(e);
        }

        Ok(updated)
    }

    /// Permanently remove a note. Its id is never reassigned.
    pub async fn delete(&self, id: NoteId) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let removed = inner.notes.remove(&id).ok_or(StoreError::NotFound(id))?;

        if let Err(e) = self.persist(&inner).await {
            inner.notes.insert(id, removed);
            return Err(e);
        }

        Ok(())
    }

    /// Number of notes currently stored.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.notes.len()
    }

    /// Whether the store holds no notes.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.notes.is_empty()
    }

    async fn persist(&self, inner: &Inner) -> StoreResult<()> {
        match &self.snapshot {
            Some(snapshot) => snapshot.save(&inner.notes, inner.next_id).await,
            None => Ok(()),
        }
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

// ============================================================================
// Tests
// ============================================================================
