//! Database layer for the kanbo application.
//!
//! A complete persistence layer on SQLite: one repository module per
//! entity, a shared connection type, and a versioned migration system.
//! Every mutating operation is authorization-gated by board ownership, and
//! batched reorder operations apply inside a single transaction so sibling
//! positions are never observable in a half-updated state.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kanbo::db::boards::Boards;
//! use kanbo::db::columns::Columns;
//!
//! let mut boards = Boards::new()?;
//! let board = boards.create("alice", "Release planning", None)?;
//! let column = Columns::new()?.create("alice", board.id, "Blocked")?;
//! # anyhow::Ok(())
//! ```

use thiserror::Error;
use uuid::Uuid;

/// Core database connection and initialization module.
pub mod db;

/// Database schema migration system.
pub mod migrations;

/// Board lifecycle and ownership gate.
pub mod boards;

/// Column lifecycle and batched column reordering.
pub mod columns;

/// Task lifecycle and batched task reordering across columns.
pub mod tasks;

/// Task comment threads.
pub mod comments;

/// Store error taxonomy.
///
/// Ownership and membership violations collapse into the not-found
/// variants: a caller probing another user's board learns nothing beyond
/// "no such board". Validation rejects before any mutation; a sqlite error
/// aborts the enclosing transaction, so partial effects are never
/// observable.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Board not found")]
    BoardNotFound,

    #[error("Column not found")]
    ColumnNotFound,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Referenced column exists but belongs to a different board.
    #[error("Invalid column {0} for this board")]
    InvalidColumn(Uuid),

    /// Comment deletion attempted by neither the author nor the board owner.
    #[error("Not allowed")]
    NotAllowed,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
