//! JSON snapshot file for persisting the store between restarts.
//!
//! File format:
//!
//! ```json
//! { "next_id": 4, "notes": [ { "id": 1, "title": "...", ... } ] }
//! ```
//!
//! `next_id` is optional when reading. Without it the counter resumes at
//! one past the highest stored id.
//!
//! Loading rejects files that break the store invariants: non-positive
//! ids, duplicate ids, `updated_at` before `created_at`, or a counter with
//! no ids left to allocate.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use notes_core::{Note, NoteId};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Contents restored from a snapshot file.
#[derive(Debug)]
pub struct Restored {
    pub notes: BTreeMap<NoteId, Note>,
    pub next_id: NoteId,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    #[serde(default)]
    next_id: Option<NoteId>,
    #[serde(default)]
    notes: Vec<Note>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    next_id: NoteId,
    notes: Vec<&'a Note>,
}

/// Location of a snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file yields an empty store.
    pub async fn load(&self) -> StoreResult<Restored> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Restored {
                    notes: BTreeMap::new(),
                    next_id: NoteId::FIRST,
                });
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let snapshot: SnapshotOwned = serde_json::from_slice(&bytes)?;

        let mut notes = BTreeMap::new();
        for note in snapshot.notes {
            if note.id.get() == 0 {
                return Err(self.invalid("note id 0 is not positive"));
            }
            if note.updated_at < note.created_at {
                return Err(self.invalid(format!(
                    "note {} was updated before it was created",
                    note.id
                )));
            }
            if let Some(duplicate) = notes.insert(note.id, note) {
                return Err(self.invalid(format!("note id {} appears twice", duplicate.id)));
            }
        }

        // The counter must stay ahead of every stored id.
        let floor = match notes.keys().next_back() {
            Some(last) => last
                .next()
                .ok_or_else(|| self.invalid(format!("note id {last} leaves no ids to allocate")))?,
            None => NoteId::FIRST,
        };
        let next_id = snapshot.next_id.map_or(floor, |id| id.max(floor));
        if next_id.next().is_none() {
            return Err(self.invalid(format!("id counter {next_id} is exhausted")));
        }

        Ok(Restored { notes, next_id })
    }

    /// Write the snapshot via a temporary sibling file and rename.
    pub async fn save(&self, notes: &BTreeMap<NoteId, Note>, next_id: NoteId) -> StoreResult<()> {
        let snapshot = SnapshotRef {
            next_id,
            notes: notes.values().collect(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn invalid(&self, reason: impl Into<String>) -> StoreError {
        StoreError::InvalidSnapshot {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Persistence {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use notes_core::NewNote;

    fn note(id: u64) -> Note {
        Note::new(
            NoteId(id),
            NewNote::new(format!("title {id}"), "body").validate().unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("absent.json"));

        let restored = file.load().await.unwrap();
        assert!(restored.notes.is_empty());
        assert_eq!(restored.next_id, NoteId::FIRST);
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_counter() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("nested/notes.json"));

        let notes: BTreeMap<_, _> = [note(1), note(2)].into_iter().map(|n| (n.id, n)).collect();
        // Note 3 was created and deleted; the counter remembers it.
        file.save(&notes, NoteId(4)).await.unwrap();

        let restored = file.load().await.unwrap();
        assert_eq!(restored.notes, notes);
        assert_eq!(restored.next_id, NoteId(4));
        assert!(!dir.path().join("nested/notes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_legacy_file_without_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        let body = serde_json::json!({ "notes": [note(2), note(5)] });
        std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();

        let restored = SnapshotFile::new(&path).load().await.unwrap();
        assert_eq!(restored.notes.len(), 2);
        assert_eq!(restored.next_id, NoteId(6));
    }

    #[tokio::test]
    async fn test_stale_counter_is_raised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.json");
        let body = serde_json::json!({ "next_id": 1, "notes": [note(3)] });
        std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();

        let restored = SnapshotFile::new(&path).load().await.unwrap();
        assert_eq!(restored.next_id, NoteId(4));
    }

    async fn load_json(body: serde_json::Value) -> StoreResult<Restored> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();
        SnapshotFile::new(&path).load().await
    }

    fn note_json(id: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "t",
            "content": "c",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
        })
    }

    #[tokio::test]
    async fn test_zero_id_is_rejected() {
        let err = load_json(serde_json::json!({ "notes": [note_json(0)] }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot { .. }));
    }

    #[tokio::test]
    async fn test_updated_before_created_is_rejected() {
        let mut stored = note_json(1);
        stored["updated_at"] = "2023-12-31T23:59:59Z".into();

        let err = load_json(serde_json::json!({ "notes": [stored] }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let err = load_json(serde_json::json!({ "notes": [note_json(2), note_json(2)] }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot { .. }));
    }

    #[tokio::test]
    async fn test_max_id_leaves_no_room_for_the_counter() {
        let err = load_json(serde_json::json!({ "notes": [note_json(u64::MAX)] }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot { .. }));
    }

    #[tokio::test]
    async fn test_exhausted_counter_is_rejected() {
        let err = load_json(serde_json::json!({ "next_id": u64::MAX, "notes": [] }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSnapshot { .. }));

        let restored = load_json(serde_json::json!({ "next_id": u64::MAX - 1, "notes": [] }))
            .await
            .unwrap();
        assert_eq!(restored.next_id, NoteId(u64::MAX - 1));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = SnapshotFile::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
