//! Dense position model and reorder wire payloads.
//!
//! Sibling order is a dense 0-based integer sequence: within one parent the
//! positions are exactly `0..n-1`. There is no fractional midpoint scheme;
//! a reorder renumbers every affected sibling and ships the complete
//! ordering, trading a larger batch for positions that never drift or
//! collide.
//!
//! The request types here are shared by the local store and the sync client.
//! Field names serialize in camelCase to match the board server's JSON
//! contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maps an ordered sequence of sibling ids to their dense positions.
pub fn position_map(ids: &[Uuid]) -> Vec<(Uuid, i64)> {
    ids.iter().enumerate().map(|(index, id)| (*id, index as i64)).collect()
}

/// True when `positions` is exactly the sequence `0..n-1`.
pub fn is_dense(positions: &[i64]) -> bool {
    positions.iter().enumerate().all(|(index, position)| *position == index as i64)
}

/// One column's slot in a full board ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOrder {
    pub id: Uuid,
    pub position: i64,
}

/// One task's slot in a full board ordering, including its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOrder {
    pub id: Uuid,
    pub column_id: Uuid,
    pub position: i64,
}

/// Complete column ordering for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub board_id: Uuid,
    pub columns: Vec<ColumnOrder>,
}

/// Complete flattened task ordering for one board, spanning every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksRequest {
    pub board_id: Uuid,
    pub tasks: Vec<TaskOrder>,
}

impl ReorderColumnsRequest {
    /// Shape check reporting the first violation only.
    pub fn validate(&self) -> Result<(), String> {
        if self.columns.is_empty() {
            return Err("Column list must not be empty".to_string());
        }
        let mut seen = Vec::with_capacity(self.columns.len());
        for entry in &self.columns {
            if entry.position < 0 {
                return Err(format!("Column {} has negative position {}", entry.id, entry.position));
            }
            if seen.contains(&entry.id) {
                return Err(format!("Column {} appears more than once", entry.id));
            }
            seen.push(entry.id);
        }
        Ok(())
    }
}

impl ReorderTasksRequest {
    /// Shape check reporting the first violation only.
    pub fn validate(&self) -> Result<(), String> {
        if self.tasks.is_empty() {
            return Err("Task list must not be empty".to_string());
        }
        let mut seen = Vec::with_capacity(self.tasks.len());
        for entry in &self.tasks {
            if entry.position < 0 {
                return Err(format!("Task {} has negative position {}", entry.id, entry.position));
            }
            if seen.contains(&entry.id) {
                return Err(format!("Task {} appears more than once", entry.id));
            }
            seen.push(entry.id);
        }
        Ok(())
    }
}
