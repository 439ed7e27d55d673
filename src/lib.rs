//! Client-side kanban board state.
//!
//! [`BoardStore`] owns the ordered columns and tasks. [`DragController`] interprets
//! drag-and-drop gestures as store mutations, and [`Persistence`] snapshots the board
//! into a key-value store after each change.
//!
//! ```
//! use kanban_board::{BoardStore, DragController, DragSubject, SubjectKind};
//!
//! let mut store = BoardStore::empty();
//! let todo = store.add_column();
//! let done = store.add_column();
//! let task = store.add_task(&todo.id).unwrap();
//!
//! let mut drag = DragController::new();
//! drag.on_gesture_start(&mut store, SubjectKind::Task, task.id.clone());
//! drag.on_gesture_over(&mut store, DragSubject::task(task.id.clone()), Some(DragSubject::column(done.id.clone())));
//! drag.on_gesture_end(&mut store, DragSubject::task(task.id.clone()), Some(DragSubject::column(done.id.clone())));
//!
//! assert_eq!(store.task_count(&todo.id), 0);
//! assert_eq!(store.task_count(&done.id), 1);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod features;

pub use config::BoardConfig;
pub use crate::core::models::{Board, Column, Id, Task};
pub use crate::core::services::{
    FileStore, IdSupplier, KeyValueStore, MemoryStore, Persistence, SequentialIds, UuidIds,
};
pub use error::{BoardError, Result};
pub use features::kanban::services::{
    BoardStore, DragController, DragState, DragSubject, Effect, GestureEvent, SubjectKind,
    SubscriptionId,
};

#[cfg(feature = "web")]
pub use crate::core::services::LocalStorage;
#[cfg(feature = "web")]
pub use features::kanban::hooks::{use_board, BoardHook};
