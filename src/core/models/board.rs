//! The board: ordered columns plus ordered tasks, persisted as one unit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Column, Id, Task};
use crate::error::{BoardError, Result};

/// Ordered columns (left to right) and ordered tasks.
///
/// Task order only carries meaning among tasks sharing a `column_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    /// The board shown on first launch.
    pub fn default_board() -> Self {
        Self {
            columns: vec![
                Column::new("todo", "To Do"),
                Column::new("doing", "In Progress"),
                Column::new("done", "Completed"),
            ],
            tasks: vec![
                Task::new("1", "todo", "Plan the week"),
                Task::new("2", "doing", "Write the first draft"),
                Task::new("3", "done", "Set up the board"),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tasks.is_empty()
    }

    pub fn column(&self, id: &Id) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task(&self, id: &Id) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn column_index(&self, id: &Id) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn task_index(&self, id: &Id) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Tasks of one column, in render order.
    pub fn tasks_in_column(&self, column_id: &Id) -> impl Iterator<Item = &Task> + '_ {
        let column_id = column_id.clone();
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    pub fn task_count(&self, column_id: &Id) -> usize {
        self.tasks.iter().filter(|t| &t.column_id == column_id).count()
    }

    /// Check per-collection id uniqueness and that every task points at a live column.
    pub fn validate(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(BoardError::DuplicateId {
                    kind: "column",
                    id: column.id.to_string(),
                });
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if !task_ids.insert(&task.id) {
                return Err(BoardError::DuplicateId {
                    kind: "task",
                    id: task.id.to_string(),
                });
            }
            if !column_ids.contains(&task.column_id) {
                return Err(BoardError::DanglingTask {
                    task: task.id.to_string(),
                    column: task.column_id.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_valid() {
        let board = Board::default_board();
        board.validate().unwrap();
        let titles: Vec<_> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["To Do", "In Progress", "Completed"]);
        for column in &board.columns {
            assert_eq!(board.task_count(&column.id), 1);
        }
    }

    #[test]
    fn validate_reports_dangling_task() {
        let board = Board::new(
            vec![Column::new(1, "To Do")],
            vec![Task::new(10, 2, "orphan")],
        );
        let err = board.validate().unwrap_err();
        assert!(matches!(err, BoardError::DanglingTask { .. }));
    }

    #[test]
    fn validate_reports_duplicate_ids_per_collection() {
        let board = Board::new(
            vec![Column::new(1, "a"), Column::new(1, "b")],
            Vec::new(),
        );
        assert!(matches!(
            board.validate(),
            Err(BoardError::DuplicateId { kind: "column", .. })
        ));

        // A task may share an id with a column
        let board = Board::new(vec![Column::new(1, "a")], vec![Task::new(1, 1, "x")]);
        board.validate().unwrap();
    }

    #[test]
    fn task_serializes_with_camel_case_column_id() {
        let task = Task::new(10, 1, "a");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "10", "columnId": "1", "content": "a" }));
    }
}
