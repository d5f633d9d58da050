//! Column repository: lifecycle and the batched column reorder.
//!
//! New columns append at the end of their board. Deleting one renumbers the
//! survivors in the same transaction, so board positions stay dense. The
//! reorder operation takes a complete ordering and applies it all-or-nothing
//! after the ownership and membership checks pass.

use crate::db::boards::ensure_owner;
use crate::db::db::Db;
use crate::db::StoreError;
use crate::libs::board::{self, Column};
use crate::libs::ordering::{self, ReorderColumnsRequest};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::HashSet;
use uuid::Uuid;

const INSERT_COLUMN: &str = "INSERT INTO columns (id, board_id, name, position) VALUES (?1, ?2, ?3, ?4)";
const COUNT_BOARD_COLUMNS: &str = "SELECT COUNT(*) FROM columns WHERE board_id = ?1";
const SELECT_COLUMN: &str = "SELECT id, board_id, name, position FROM columns WHERE id = ?1";
const SELECT_COLUMN_BOARD: &str = "SELECT board_id FROM columns WHERE id = ?1";
const SELECT_BOARD_COLUMN_IDS: &str = "SELECT id FROM columns WHERE board_id = ?1 ORDER BY position";
const UPDATE_COLUMN_NAME: &str = "UPDATE columns SET name = ?1 WHERE id = ?2";
const UPDATE_COLUMN_POSITION: &str = "UPDATE columns SET position = ?1 WHERE id = ?2";
const DELETE_COLUMN: &str = "DELETE FROM columns WHERE id = ?1";

pub struct Columns {
    db: Db,
}

impl Columns {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    /// Adds a column at the end of the board.
    pub fn create(&mut self, owner: &str, board_id: Uuid, name: &str) -> Result<Column> {
        board::validate_column_name(name).map_err(StoreError::Validation)?;
        ensure_owner(&self.db.conn, board_id, owner)?;

        let tx = self.db.conn.transaction()?;
        let position: i64 = tx.query_row(COUNT_BOARD_COLUMNS, params![board_id], |row| row.get(0))?;
        let column = Column::new(board_id, name.trim(), position);
        tx.execute(INSERT_COLUMN, params![column.id, column.board_id, column.name, column.position])?;
        tx.commit()?;

        Ok(column)
    }

    pub fn rename(&mut self, owner: &str, column_id: Uuid, name: &str) -> Result<Column> {
        board::validate_column_name(name).map_err(StoreError::Validation)?;
        let board_id = board_of_column(&self.db.conn, column_id)?;
        ensure_owner(&self.db.conn, board_id, owner)?;

        self.db.conn.execute(UPDATE_COLUMN_NAME, params![name.trim(), column_id])?;
        let column = self
            .db
            .conn
            .query_row(SELECT_COLUMN, params![column_id], |row| {
                Ok(Column {
                    id: row.get(0)?,
                    board_id: row.get(1)?,
                    name: row.get(2)?,
                    position: row.get(3)?,
                    tasks: Vec::new(),
                })
            })
            .optional()?;
        column.ok_or_else(|| StoreError::ColumnNotFound.into())
    }

    /// Deletes a column with its tasks and renumbers the remaining columns
    /// in the same transaction.
    pub fn delete(&mut self, owner: &str, column_id: Uuid) -> Result<()> {
        let board_id = board_of_column(&self.db.conn, column_id)?;
        ensure_owner(&self.db.conn, board_id, owner)?;

        let tx = self.db.conn.transaction()?;
        tx.execute(DELETE_COLUMN, params![column_id])?;
        renumber_board_columns(&tx, board_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Applies a complete column ordering for one board.
    ///
    /// Rejections happen before any write: payload shape first, then the
    /// ownership gate, then membership of every referenced column. The
    /// position updates themselves commit atomically.
    pub fn reorder(&mut self, owner: &str, request: &ReorderColumnsRequest) -> Result<()> {
        request.validate().map_err(StoreError::Validation)?;
        ensure_owner(&self.db.conn, request.board_id, owner)?;

        let board_columns = board_column_ids(&self.db.conn, request.board_id)?;
        for entry in &request.columns {
            if !board_columns.contains(&entry.id) {
                return Err(StoreError::ColumnNotFound.into());
            }
        }

        let tx = self.db.conn.transaction()?;
        for entry in &request.columns {
            tx.execute(UPDATE_COLUMN_POSITION, params![entry.position, entry.id])?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Board owning the given column, or [`StoreError::ColumnNotFound`].
pub(crate) fn board_of_column(conn: &Connection, column_id: Uuid) -> Result<Uuid, StoreError> {
    conn.query_row(SELECT_COLUMN_BOARD, params![column_id], |row| row.get(0))
        .optional()?
        .ok_or(StoreError::ColumnNotFound)
}

/// Ids of every column on a board.
pub(crate) fn board_column_ids(conn: &Connection, board_id: Uuid) -> Result<HashSet<Uuid>, StoreError> {
    let mut stmt = conn.prepare(SELECT_BOARD_COLUMN_IDS)?;
    let ids = stmt
        .query_map(params![board_id], |row| row.get::<_, Uuid>(0))?
        .collect::<std::result::Result<HashSet<_>, _>>()?;
    Ok(ids)
}

/// Renumbers a board's columns to their dense display order.
pub(crate) fn renumber_board_columns(tx: &Transaction, board_id: Uuid) -> Result<(), StoreError> {
    let mut stmt = tx.prepare(SELECT_BOARD_COLUMN_IDS)?;
    let ids = stmt
        .query_map(params![board_id], |row| row.get::<_, Uuid>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    drop(stmt);

    for (id, position) in ordering::position_map(&ids) {
        tx.execute(UPDATE_COLUMN_POSITION, params![position, id])?;
    }
    Ok(())
}
