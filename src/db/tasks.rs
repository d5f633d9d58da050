//! Task repository: lifecycle, field updates and the batched task reorder.
//!
//! New tasks append at the end of their column. Field updates never touch
//! `position` or `column_id`; every ordering change, including moving a
//! task between columns, goes through [`Tasks::reorder`] with the complete
//! flattened ordering of the board. Deleting a task renumbers its column in
//! the same transaction.

use crate::db::boards::ensure_owner;
use crate::db::columns::board_column_ids;
use crate::db::db::Db;
use crate::db::StoreError;
use crate::libs::board::{self, Task};
use crate::libs::ordering::{self, ReorderTasksRequest};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::HashSet;
use uuid::Uuid;

const INSERT_TASK: &str = "INSERT INTO tasks (id, board_id, column_id, title, description, due_date, assignee, position)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const COUNT_COLUMN_TASKS: &str = "SELECT COUNT(*) FROM tasks WHERE column_id = ?1";
const SELECT_TASK: &str = "SELECT id, board_id, column_id, title, description, due_date, assignee, position
    FROM tasks WHERE id = ?1";
const SELECT_TASK_REFS: &str = "SELECT board_id, column_id FROM tasks WHERE id = ?1";
const SELECT_COLUMN_BOARD: &str = "SELECT board_id FROM columns WHERE id = ?1";
const SELECT_BOARD_TASK_IDS: &str = "SELECT id FROM tasks WHERE board_id = ?1";
const SELECT_COLUMN_TASK_IDS: &str = "SELECT id FROM tasks WHERE column_id = ?1 ORDER BY position";
const UPDATE_TASK_FIELDS: &str = "UPDATE tasks SET title = ?1, description = ?2, due_date = ?3, assignee = ?4 WHERE id = ?5";
const UPDATE_TASK_ORDER: &str = "UPDATE tasks SET column_id = ?1, position = ?2 WHERE id = ?3";
const UPDATE_TASK_POSITION: &str = "UPDATE tasks SET position = ?1 WHERE id = ?2";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Field changes for a task update. `None` keeps the current value; inner
/// `None` clears an optional field.
#[derive(Debug, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDateTime>>,
    pub assignee: Option<Option<String>>,
}

pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    /// Inserts a task at the end of its column.
    ///
    /// The task's column must belong to the task's board; a column from
    /// another board is rejected before anything is written. Any position
    /// carried by `task` is ignored, append order is assigned here.
    pub fn create(&mut self, owner: &str, task: &Task) -> Result<Task> {
        board::validate_task_title(&task.title).map_err(StoreError::Validation)?;
        if let Some(description) = &task.description {
            board::validate_task_description(description).map_err(StoreError::Validation)?;
        }
        ensure_owner(&self.db.conn, task.board_id, owner)?;

        let column_board: Option<Uuid> = self
            .db
            .conn
            .query_row(SELECT_COLUMN_BOARD, params![task.column_id], |row| row.get(0))
            .optional()?;
        if column_board != Some(task.board_id) {
            return Err(StoreError::InvalidColumn(task.column_id).into());
        }

        let tx = self.db.conn.transaction()?;
        let position: i64 = tx.query_row(COUNT_COLUMN_TASKS, params![task.column_id], |row| row.get(0))?;
        tx.execute(
            INSERT_TASK,
            params![
                task.id,
                task.board_id,
                task.column_id,
                task.title.trim(),
                task.description,
                task.due_date,
                task.assignee,
                position
            ],
        )?;
        tx.commit()?;

        let mut created = task.clone();
        created.title = created.title.trim().to_string();
        created.position = position;
        Ok(created)
    }

    /// Applies a partial field update; ordering is out of scope here.
    pub fn update(&mut self, owner: &str, task_id: Uuid, update: &TaskUpdate) -> Result<Task> {
        let (board_id, _) = task_refs(&self.db.conn, task_id)?;
        ensure_owner(&self.db.conn, board_id, owner)?;

        let current = self.fetch(task_id)?.ok_or(StoreError::TaskNotFound)?;

        let title = match &update.title {
            Some(title) => {
                board::validate_task_title(title).map_err(StoreError::Validation)?;
                title.trim().to_string()
            }
            None => current.title,
        };
        let description = match &update.description {
            Some(Some(description)) => {
                board::validate_task_description(description).map_err(StoreError::Validation)?;
                Some(description.clone())
            }
            Some(None) => None,
            None => current.description,
        };
        let due_date = match &update.due_date {
            Some(due_date) => *due_date,
            None => current.due_date,
        };
        let assignee = match &update.assignee {
            Some(assignee) => assignee.clone(),
            None => current.assignee,
        };

        self.db
            .conn
            .execute(UPDATE_TASK_FIELDS, params![title, description, due_date, assignee, task_id])?;
        self.fetch(task_id)?.ok_or_else(|| StoreError::TaskNotFound.into())
    }

    /// Deletes a task with its comments and renumbers the source column in
    /// the same transaction.
    pub fn delete(&mut self, owner: &str, task_id: Uuid) -> Result<()> {
        let (board_id, column_id) = task_refs(&self.db.conn, task_id)?;
        ensure_owner(&self.db.conn, board_id, owner)?;

        let tx = self.db.conn.transaction()?;
        tx.execute(DELETE_TASK, params![task_id])?;
        renumber_column_tasks(&tx, column_id)?;
        tx.commit()?;
        Ok(())
    }

    /// Applies a complete flattened task ordering for one board.
    ///
    /// Every referenced task and every referenced destination column must
    /// belong to the request's board, otherwise nothing at all is written.
    /// The updates themselves, including column changes, commit atomically.
    pub fn reorder(&mut self, owner: &str, request: &ReorderTasksRequest) -> Result<()> {
        request.validate().map_err(StoreError::Validation)?;
        ensure_owner(&self.db.conn, request.board_id, owner)?;

        let board_tasks = board_task_ids(&self.db.conn, request.board_id)?;
        let board_columns = board_column_ids(&self.db.conn, request.board_id)?;
        for entry in &request.tasks {
            if !board_tasks.contains(&entry.id) {
                return Err(StoreError::TaskNotFound.into());
            }
            if !board_columns.contains(&entry.column_id) {
                return Err(StoreError::InvalidColumn(entry.column_id).into());
            }
        }

        let tx = self.db.conn.transaction()?;
        for entry in &request.tasks {
            tx.execute(UPDATE_TASK_ORDER, params![entry.column_id, entry.position, entry.id])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn fetch(&self, task_id: Uuid) -> Result<Option<Task>> {
        let task = self
            .db
            .conn
            .query_row(SELECT_TASK, params![task_id], |row| {
                Ok(Task {
                    id: row.get(0)?,
                    board_id: row.get(1)?,
                    column_id: row.get(2)?,
                    title: row.get(3)?,
                    description: row.get(4)?,
                    due_date: row.get(5)?,
                    assignee: row.get(6)?,
                    position: row.get(7)?,
                    comments: Vec::new(),
                })
            })
            .optional()?;
        Ok(task)
    }
}

/// Board and column of the given task, or [`StoreError::TaskNotFound`].
pub(crate) fn task_refs(conn: &Connection, task_id: Uuid) -> Result<(Uuid, Uuid), StoreError> {
    conn.query_row(SELECT_TASK_REFS, params![task_id], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()?
        .ok_or(StoreError::TaskNotFound)
}

/// Ids of every task on a board, across all columns.
pub(crate) fn board_task_ids(conn: &Connection, board_id: Uuid) -> Result<HashSet<Uuid>, StoreError> {
    let mut stmt = conn.prepare(SELECT_BOARD_TASK_IDS)?;
    let ids = stmt
        .query_map(params![board_id], |row| row.get::<_, Uuid>(0))?
        .collect::<std::result::Result<HashSet<_>, _>>()?;
    Ok(ids)
}

/// Renumbers a column's tasks to their dense display order.
pub(crate) fn renumber_column_tasks(tx: &Transaction, column_id: Uuid) -> Result<(), StoreError> {
    let mut stmt = tx.prepare(SELECT_COLUMN_TASK_IDS)?;
    let ids = stmt
        .query_map(params![column_id], |row| row.get::<_, Uuid>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    drop(stmt);

    for (id, position) in ordering::position_map(&ids) {
        tx.execute(UPDATE_TASK_POSITION, params![position, id])?;
    }
    Ok(())
}
