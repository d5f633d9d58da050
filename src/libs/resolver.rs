//! Drag gesture resolution.
//!
//! Translates "dragged X, dropped on Y" into an explicit splice plan, or
//! into no plan at all. Every no-op case (self-drop, unknown target,
//! resolved destination equal to the source) returns `None`, and callers
//! must treat `None` as "issue no store call and no sync request".
//!
//! Resolution is pure: it reads a board snapshot and never mutates it.

use crate::libs::board::Board;
use uuid::Uuid;

/// What the dragged entity was dropped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column itself (its header when dragging columns, or the column as
    /// a whole when dragging tasks).
    Column(Uuid),
    /// Another task.
    Task(Uuid),
    /// A column's open drop area below its tasks; always means append.
    ColumnBody(Uuid),
}

/// A resolved column reorder: splice `from` out of the column list and
/// reinsert at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMove {
    pub column_id: Uuid,
    pub from: usize,
    pub to: usize,
}

/// A resolved task move between (or within) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: Uuid,
    pub from_column: Uuid,
    pub from_index: usize,
    pub to_column: Uuid,
    pub to_index: usize,
}

/// Resolves a column drag. Columns only reorder against other columns;
/// any other target is a no-op.
pub fn resolve_column_move(board: &Board, column_id: Uuid, target: DropTarget) -> Option<ColumnMove> {
    let DropTarget::Column(over_id) = target else {
        return None;
    };
    let from = board.columns.iter().position(|c| c.id == column_id)?;
    let to = board.columns.iter().position(|c| c.id == over_id)?;
    if from == to {
        return None;
    }
    Some(ColumnMove { column_id, from, to })
}

/// Resolves a task drag.
///
/// Dropping on a task targets that task's column at that task's current
/// index. The splice removes the dragged task before reinserting, so a
/// forward drag within one column lands just past the target and a
/// backward drag lands on it. Dropping on a column or its body appends;
/// within the dragged task's own column the count still includes the task
/// itself, so the end slot is the count less one.
pub fn resolve_task_move(board: &Board, task_id: Uuid, target: DropTarget) -> Option<TaskMove> {
    let from_column = board.column_of_task(task_id)?;
    let from_index = from_column.tasks.iter().position(|t| t.id == task_id)?;

    let to_column = match target {
        DropTarget::Task(over_id) => board.column_of_task(over_id)?,
        DropTarget::Column(id) | DropTarget::ColumnBody(id) => board.columns.iter().find(|c| c.id == id)?,
    };
    let to_index = match target {
        DropTarget::Task(over_id) => to_column.tasks.iter().position(|t| t.id == over_id)?,
        DropTarget::Column(_) | DropTarget::ColumnBody(_) => {
            if from_column.id == to_column.id {
                to_column.tasks.len() - 1
            } else {
                to_column.tasks.len()
            }
        }
    };

    if from_column.id == to_column.id && from_index == to_index {
        return None;
    }

    Some(TaskMove {
        task_id,
        from_column: from_column.id,
        from_index,
        to_column: to_column.id,
        to_index,
    })
}
