//! Snapshot persistence over a plain key-value store.
//!
//! The whole board is written as one JSON document under a single key:
//! `{ "version": 1, "savedAt": "...", "columns": [...], "tasks": [...] }`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::core::models::Board;
use crate::error::{BoardError, Result};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// String key-value storage holding serialized snapshots.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written snapshot
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotOut<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    #[serde(flatten)]
    board: &'a Board,
}

#[derive(Deserialize)]
struct SnapshotIn {
    #[serde(default = "legacy_version")]
    version: u32,
    #[serde(flatten)]
    board: Board,
}

// Snapshots written before the envelope existed carry no version field
fn legacy_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Serialize a board into a snapshot document.
pub fn encode_snapshot(board: &Board) -> Result<String> {
    let snapshot = SnapshotOut {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        board,
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Parse and validate a snapshot document.
pub fn decode_snapshot(raw: &str) -> Result<Board> {
    let snapshot: SnapshotIn = serde_json::from_str(raw)?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(BoardError::UnsupportedVersion {
            found: snapshot.version,
            supported: SNAPSHOT_VERSION,
        });
    }
    snapshot.board.validate()?;
    Ok(snapshot.board)
}

/// Loads and saves board snapshots through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
    key: String,
    seed_default_board: bool,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, config: &BoardConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            seed_default_board: config.seed_default_board,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored board. Missing, unreadable or corrupt snapshots yield `None`.
    pub fn load(&self) -> Option<Board> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored board snapshot");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read board snapshot");
                return None;
            }
        };

        match decode_snapshot(&raw) {
            Ok(board) => {
                tracing::info!(
                    key = %self.key,
                    columns = board.columns.len(),
                    tasks = board.tasks.len(),
                    "loaded board snapshot"
                );
                Some(board)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unusable board snapshot");
                None
            }
        }
    }

    /// Stored board, or the fallback board when nothing usable is stored.
    pub fn load_or_default(&self) -> Board {
        self.load().unwrap_or_else(|| {
            if self.seed_default_board {
                Board::default_board()
            } else {
                Board::default()
            }
        })
    }

    pub fn save(&self, board: &Board) -> Result<()> {
        let raw = encode_snapshot(board)?;
        self.store.set(&self.key, &raw)?;
        tracing::debug!(
            key = %self.key,
            columns = board.columns.len(),
            tasks = board.tasks.len(),
            "saved board snapshot"
        );
        Ok(())
    }

    /// Save and log failures instead of returning them.
    pub fn save_in_background(&self, board: &Board) {
        if let Err(e) = self.save(board) {
            tracing::error!(key = %self.key, error = %e, "failed to save board snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Column, Task};

    fn sample_board() -> Board {
        Board::new(
            vec![Column::new(1, "To Do"), Column::new(2, "Doing")],
            vec![
                Task::new(10, 1, "a"),
                Task::new(11, 2, "b"),
                Task::new(12, 1, "c"),
            ],
        )
    }

    #[test]
    fn save_then_load_reproduces_board() {
        let persistence = Persistence::new(MemoryStore::new(), &BoardConfig::default());
        let board = sample_board();
        persistence.save(&board).unwrap();
        assert_eq!(persistence.load(), Some(board));
    }

    #[test]
    fn snapshot_document_has_envelope_fields() {
        let raw = encode_snapshot(&sample_board()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["savedAt"].is_string());
        assert_eq!(value["columns"][1]["title"], "Doing");
        assert_eq!(value["tasks"][2]["columnId"], "1");
    }

    #[test]
    fn bare_snapshot_without_envelope_still_loads() {
        let raw = r#"{ "columns": [{ "id": "1", "title": "To Do" }], "tasks": [] }"#;
        let board = decode_snapshot(raw).unwrap();
        assert_eq!(board.columns.len(), 1);
    }

    #[test]
    fn missing_snapshot_falls_back_to_default_board() {
        let persistence = Persistence::new(MemoryStore::new(), &BoardConfig::default());
        assert_eq!(persistence.load(), None);
        assert_eq!(persistence.load_or_default(), Board::default_board());
    }

    #[test]
    fn fallback_can_be_an_empty_board() {
        let config = BoardConfig {
            seed_default_board: false,
            ..Default::default()
        };
        let persistence = Persistence::new(MemoryStore::new(), &config);
        assert!(persistence.load_or_default().is_empty());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_default_board() {
        let store = MemoryStore::new();
        store.set("kanban-board", "{ definitely not json").unwrap();
        let persistence = Persistence::new(store, &BoardConfig::default());
        assert_eq!(persistence.load_or_default(), Board::default_board());
    }

    #[test]
    fn snapshot_with_dangling_task_is_rejected() {
        let raw = r#"{ "columns": [], "tasks": [{ "id": "1", "columnId": "9", "content": "x" }] }"#;
        assert!(matches!(
            decode_snapshot(raw),
            Err(BoardError::DanglingTask { .. })
        ));
    }

    #[test]
    fn newer_snapshot_version_is_rejected() {
        let raw = r#"{ "version": 99, "columns": [], "tasks": [] }"#;
        assert!(matches!(
            decode_snapshot(raw),
            Err(BoardError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("boards"));
        assert_eq!(store.get("kanban-board").unwrap(), None);

        let persistence = Persistence::new(store, &BoardConfig::default());
        let board = sample_board();
        persistence.save(&board).unwrap();
        assert!(dir.path().join("boards/kanban-board.json").exists());
        assert_eq!(persistence.load(), Some(board));
    }
}
