//! Error types for board persistence and configuration.
//!
//! Board mutations themselves are total and never fail; these errors only come out of
//! the snapshot store, snapshot decoding and config parsing.

use thiserror::Error;

/// Result type for kanban board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while loading, saving or configuring a board
#[derive(Debug, Error)]
pub enum BoardError {
    /// The key-value backend refused a read or write
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Filesystem failure in a file-backed store
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot was written by a newer format
    #[error("unsupported snapshot version {found} (expected at most {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Two entities in the same collection share an id
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A task references a column that does not exist
    #[error("task '{task}' references missing column '{column}'")]
    DanglingTask { task: String, column: String },

    /// Invalid configuration document
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl BoardError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
