//! Board State Store: owns the ordered columns and tasks and publishes a snapshot to
//! subscribers after every committed change.

use crate::config::BoardConfig;
use crate::core::models::{Board, Column, Id, Task};
use crate::core::services::{IdSupplier, KeyValueStore, Persistence, SequentialIds};

use super::reorder;

/// Handle returned by [`BoardStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Board)>;

pub struct BoardStore {
    board: Board,
    ids: Box<dyn IdSupplier>,
    config: BoardConfig,
    revision: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore")
            .field("board", &self.board)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl BoardStore {
    pub fn new(board: Board, ids: impl IdSupplier + 'static, config: BoardConfig) -> Self {
        let mut store = Self {
            board: Board::default(),
            ids: Box::new(ids),
            config,
            revision: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        store.observe_ids(&board);
        store.board = board;
        store
    }

    /// Empty board, sequential ids, default config.
    pub fn empty() -> Self {
        Self::new(Board::default(), SequentialIds::new(), BoardConfig::default())
    }

    /// The fixed three-column starter board.
    pub fn with_defaults() -> Self {
        Self::new(Board::default_board(), SequentialIds::new(), BoardConfig::default())
    }

    /// Seed from persisted state (or the fallback board) and keep saving every change.
    pub fn load<S>(persistence: Persistence<S>, ids: impl IdSupplier + 'static, config: BoardConfig) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let board = persistence.load_or_default();
        let mut store = Self::new(board, ids, config);
        store.persist_to(persistence);
        store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Bumped once per committed change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.board.tasks
    }

    pub fn column(&self, id: &Id) -> Option<&Column> {
        self.board.column(id)
    }

    pub fn task(&self, id: &Id) -> Option<&Task> {
        self.board.task(id)
    }

    pub fn tasks_in_column(&self, column_id: &Id) -> Vec<&Task> {
        self.board.tasks_in_column(column_id).collect()
    }

    pub fn task_count(&self, column_id: &Id) -> usize {
        self.board.task_count(column_id)
    }

    /// Register a callback receiving the board after each committed change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Board) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Save a snapshot after every committed change. Save failures are logged.
    pub fn persist_to<S>(&mut self, persistence: Persistence<S>) -> SubscriptionId
    where
        S: KeyValueStore + 'static,
    {
        self.subscribe(move |board| persistence.save_in_background(board))
    }

    /// Swap in a whole board, e.g. one loaded after construction.
    pub fn replace(&mut self, board: Board) {
        self.observe_ids(&board);
        self.board = board;
        self.commit("replace board");
    }

    pub fn add_column(&mut self) -> Column {
        let column = Column::new(
            self.ids.next_id(),
            self.config.column_title(self.board.columns.len() + 1),
        );
        self.board.columns.push(column.clone());
        self.commit("add column");
        column
    }

    pub fn rename_column(&mut self, id: &Id, title: impl Into<String>) -> bool {
        let Some(index) = self.board.column_index(id) else {
            tracing::trace!(%id, "rename of unknown column ignored");
            return false;
        };
        self.board.columns[index].update_title(title.into());
        self.commit("rename column");
        true
    }

    /// Remove a column together with all of its tasks.
    pub fn delete_column(&mut self, id: &Id) -> bool {
        let Some(index) = self.board.column_index(id) else {
            tracing::trace!(%id, "delete of unknown column ignored");
            return false;
        };
        // Both collections change before anyone is notified
        self.board.columns.remove(index);
        let before = self.board.tasks.len();
        self.board.tasks.retain(|t| &t.column_id != id);
        tracing::debug!(%id, removed_tasks = before - self.board.tasks.len(), "cascade delete");
        self.commit("delete column");
        true
    }

    pub fn move_column(&mut self, from_id: &Id, to_id: &Id) -> bool {
        match reorder::move_column(&self.board.columns, from_id, to_id) {
            Some(columns) => {
                self.board.columns = columns;
                self.commit("move column");
                true
            }
            None => {
                tracing::trace!(%from_id, %to_id, "column move ignored");
                false
            }
        }
    }

    /// Append a task to a column. Unknown columns are rejected with `None`.
    pub fn add_task(&mut self, column_id: &Id) -> Option<Task> {
        if self.board.column(column_id).is_none() {
            tracing::trace!(%column_id, "task for unknown column rejected");
            return None;
        }
        let task = Task::new(
            self.ids.next_id(),
            column_id.clone(),
            self.config.task_content(self.board.tasks.len() + 1),
        );
        self.board.tasks.push(task.clone());
        self.commit("add task");
        Some(task)
    }

    pub fn rename_task_content(&mut self, id: &Id, content: impl Into<String>) -> bool {
        let Some(index) = self.board.task_index(id) else {
            tracing::trace!(%id, "edit of unknown task ignored");
            return false;
        };
        self.board.tasks[index].update_content(content.into());
        self.commit("edit task");
        true
    }

    pub fn delete_task(&mut self, id: &Id) -> bool {
        let Some(index) = self.board.task_index(id) else {
            tracing::trace!(%id, "delete of unknown task ignored");
            return false;
        };
        self.board.tasks.remove(index);
        self.commit("delete task");
        true
    }

    /// Slide `active_id` onto `over_id`'s slot and into `over_id`'s column.
    pub fn reorder_task_within_column(&mut self, active_id: &Id, over_id: &Id) -> bool {
        match reorder::reorder_task(&self.board.tasks, active_id, over_id) {
            Some(tasks) => {
                self.board.tasks = tasks;
                self.commit("reorder task");
                true
            }
            None => {
                tracing::trace!(%active_id, %over_id, "task reorder ignored");
                false
            }
        }
    }

    /// Reassign a task's column, keeping its place in the task sequence.
    pub fn move_task_to_column(&mut self, task_id: &Id, column_id: &Id) -> bool {
        if self.board.column(column_id).is_none() {
            tracing::trace!(%task_id, %column_id, "move to unknown column ignored");
            return false;
        }
        match reorder::retarget_task(&self.board.tasks, task_id, column_id) {
            Some(tasks) => {
                self.board.tasks = tasks;
                self.commit("move task to column");
                true
            }
            None => {
                tracing::trace!(%task_id, %column_id, "task column move ignored");
                false
            }
        }
    }

    fn observe_ids(&mut self, board: &Board) {
        for column in &board.columns {
            self.ids.observe(&column.id);
        }
        for task in &board.tasks {
            self.ids.observe(&task.id);
        }
    }

    fn commit(&mut self, op: &'static str) {
        debug_assert!(
            self.board.validate().is_ok(),
            "board invariant broken by {}: {:?}",
            op,
            self.board.validate()
        );
        self.revision += 1;
        tracing::debug!(
            op,
            revision = self.revision,
            columns = self.board.columns.len(),
            tasks = self.board.tasks.len(),
            "board changed"
        );
        let board = &self.board;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(board);
        }
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::empty()
    }
}
