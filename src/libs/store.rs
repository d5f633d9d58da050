//! In-memory board mirror with optimistic mutation.
//!
//! `BoardState` holds the client's working copy of one board. Resolved moves
//! are applied to the mirror immediately, before persistence or sync
//! resolve, so the user sees the final layout at once. After every splice
//! the whole board is renumbered, which is what keeps positions dense and is
//! also where the complete reorder payloads come from.
//!
//! A failed downstream write does not roll the mirror back. The divergence
//! window closes on the next [`BoardState::reload`] with the authoritative
//! copy.

use crate::libs::board::Board;
use crate::libs::ordering::{self, ColumnOrder, ReorderColumnsRequest, ReorderTasksRequest, TaskOrder};
use crate::libs::resolver::{ColumnMove, TaskMove};

#[derive(Debug)]
pub struct BoardState {
    board: Board,
}

impl BoardState {
    /// Wraps a fetched board, sorting children by position in case the
    /// source returned them unordered.
    pub fn new(mut board: Board) -> Self {
        board.columns.sort_by_key(|c| c.position);
        for column in &mut board.columns {
            column.tasks.sort_by_key(|t| t.position);
        }
        BoardState { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Splices a column to its resolved slot and renumbers everything.
    pub fn apply_column_move(&mut self, mv: &ColumnMove) {
        let column = self.board.columns.remove(mv.from);
        self.board.columns.insert(mv.to, column);
        self.normalize();
    }

    /// Splices a task out of its source column into its destination column
    /// and renumbers everything.
    pub fn apply_task_move(&mut self, mv: &TaskMove) {
        let Some(source) = self.board.columns.iter().position(|c| c.id == mv.from_column) else {
            return;
        };
        let Some(destination) = self.board.columns.iter().position(|c| c.id == mv.to_column) else {
            return;
        };
        let mut task = self.board.columns[source].tasks.remove(mv.from_index);
        task.column_id = mv.to_column;
        self.board.columns[destination].tasks.insert(mv.to_index, task);
        self.normalize();
    }

    /// Complete column ordering payload for this board.
    pub fn column_order(&self) -> ReorderColumnsRequest {
        ReorderColumnsRequest {
            board_id: self.board.id,
            columns: self
                .board
                .columns
                .iter()
                .map(|c| ColumnOrder {
                    id: c.id,
                    position: c.position,
                })
                .collect(),
        }
    }

    /// Complete flattened task ordering payload, spanning every column.
    pub fn task_order(&self) -> ReorderTasksRequest {
        ReorderTasksRequest {
            board_id: self.board.id,
            tasks: self
                .board
                .columns
                .iter()
                .flat_map(|c| c.tasks.iter())
                .map(|t| TaskOrder {
                    id: t.id,
                    column_id: t.column_id,
                    position: t.position,
                })
                .collect(),
        }
    }

    /// Replaces the mirror with an authoritative re-fetch.
    pub fn reload(&mut self, board: Board) {
        *self = BoardState::new(board);
    }

    /// Renumbers every column and every task to its index and refreshes
    /// task column ownership. Restores the dense invariant after a splice.
    fn normalize(&mut self) {
        for (index, column) in self.board.columns.iter_mut().enumerate() {
            column.position = index as i64;
            for (task_index, task) in column.tasks.iter_mut().enumerate() {
                task.position = task_index as i64;
                task.column_id = column.id;
            }
        }
        debug_assert!(self.is_dense());
    }

    fn is_dense(&self) -> bool {
        let column_positions: Vec<i64> = self.board.columns.iter().map(|c| c.position).collect();
        ordering::is_dense(&column_positions)
            && self.board.columns.iter().all(|column| {
                let task_positions: Vec<i64> = column.tasks.iter().map(|t| t.position).collect();
                ordering::is_dense(&task_positions)
            })
    }
}
