//! Copy-on-write move-by-index helpers.
//!
//! Each helper returns a new sequence and leaves its input untouched.

use crate::core::models::{Column, Id, Task};

/// Remove the element at `from` and reinsert it at `to`, shifting the elements in
/// between by one slot. Out-of-range indices return an unchanged copy.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() || from == to {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

/// Move column `from_id` into the slot held by `to_id`.
///
/// `None` when the ids are equal or either one is unknown.
pub fn move_column(columns: &[Column], from_id: &Id, to_id: &Id) -> Option<Vec<Column>> {
    if from_id == to_id {
        return None;
    }
    let from = columns.iter().position(|c| &c.id == from_id)?;
    let to = columns.iter().position(|c| &c.id == to_id)?;
    Some(array_move(columns, from, to))
}

/// Move task `active_id` onto the slot held by `over_id`, adopting `over_id`'s column.
///
/// Within one column this is plain move-by-index. Coming from another column the task
/// lands directly in front of the target, so its index inside the target column is the
/// target's index before the move. `None` when the ids are equal or either is unknown.
pub fn reorder_task(tasks: &[Task], active_id: &Id, over_id: &Id) -> Option<Vec<Task>> {
    if active_id == over_id {
        return None;
    }
    let from = tasks.iter().position(|t| &t.id == active_id)?;
    let over = tasks.iter().position(|t| &t.id == over_id)?;
    let target_column = tasks[over].column_id.clone();
    let crossing = tasks[from].column_id != target_column;

    let to = if crossing && from < over { over - 1 } else { over };

    let mut reordered: Vec<Task> = tasks.to_vec();
    let mut active = reordered.remove(from);
    active.set_column(target_column);
    reordered.insert(to, active);
    Some(reordered)
}

/// Reassign a task to another column without moving it in the task sequence.
///
/// `None` when the task is unknown or already in that column.
pub fn retarget_task(tasks: &[Task], task_id: &Id, column_id: &Id) -> Option<Vec<Task>> {
    let index = tasks.iter().position(|t| &t.id == task_id)?;
    if &tasks[index].column_id == column_id {
        return None;
    }
    let mut retargeted = tasks.to_vec();
    retargeted[index].set_column(column_id.clone());
    Some(retargeted)
}
