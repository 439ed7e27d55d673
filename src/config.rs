//! Board configuration

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Key the board snapshot is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "kanban-board";

/// Tunables for a board store and its persistence bridge.
///
/// Every field has a default, so a config document only needs the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Key in the key-value store holding the serialized board
    pub storage_key: String,
    /// New columns are titled `"{prefix} {n}"`
    pub column_title_prefix: String,
    /// New tasks get `"{prefix} {n}"` as content
    pub task_content_prefix: String,
    /// Seed the fixed three-column board when no snapshot exists; otherwise start empty
    pub seed_default_board: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            column_title_prefix: "Column".to_string(),
            task_content_prefix: "Task".to_string(),
            seed_default_board: true,
        }
    }
}

impl BoardConfig {
    /// Parse a (possibly partial) JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| BoardError::Config {
            message: e.to_string(),
        })?;
        if config.storage_key.trim().is_empty() {
            return Err(BoardError::Config {
                message: "storageKey must not be empty".to_string(),
            });
        }
        Ok(config)
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub(crate) fn column_title(&self, n: usize) -> String {
        format!("{} {}", self.column_title_prefix, n)
    }

    pub(crate) fn task_content(&self, n: usize) -> String {
        format!("{} {}", self.task_content_prefix, n)
    }
}
