//! Board repository: lifecycle, listing and the full tree fetch.
//!
//! Also hosts [`ensure_owner`], the ownership gate every other repository
//! calls before mutating anything under a board. Boards are private to
//! their owner; a missing board and a board owned by someone else are
//! indistinguishable to callers.

use crate::db::db::Db;
use crate::db::StoreError;
use crate::libs::board::{self, Board, Column, Comment, Task, DEFAULT_COLUMNS};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

const INSERT_BOARD: &str = "INSERT INTO boards (id, title, description, owner, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, datetime(CURRENT_TIMESTAMP, 'localtime'), datetime(CURRENT_TIMESTAMP, 'localtime'))";
const INSERT_COLUMN: &str = "INSERT INTO columns (id, board_id, name, position) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BOARDS_BY_OWNER: &str = "SELECT id, title, description, owner, archived, created_at, updated_at
    FROM boards WHERE owner = ?1 ORDER BY updated_at DESC";
const SELECT_BOARD: &str = "SELECT id, title, description, owner, archived, created_at, updated_at
    FROM boards WHERE id = ?1";
const SELECT_COLUMNS: &str = "SELECT id, board_id, name, position FROM columns WHERE board_id = ?1 ORDER BY position";
const SELECT_COLUMN_TASKS: &str = "SELECT id, board_id, column_id, title, description, due_date, assignee, position
    FROM tasks WHERE column_id = ?1 ORDER BY position";
const SELECT_TASK_COMMENTS: &str = "SELECT id, task_id, author, content, created_at
    FROM comments WHERE task_id = ?1 ORDER BY created_at";
const UPDATE_BOARD: &str = "UPDATE boards SET title = ?1, description = ?2, archived = ?3,
    updated_at = datetime(CURRENT_TIMESTAMP, 'localtime') WHERE id = ?4";
const DELETE_BOARD: &str = "DELETE FROM boards WHERE id = ?1";
const SELECT_OWNER: &str = "SELECT owner FROM boards WHERE id = ?1";

/// Field changes for a board update. `None` keeps the current value;
/// `description: Some(None)` clears the description.
#[derive(Debug, Default)]
pub struct BoardUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub archived: Option<bool>,
}

pub struct Boards {
    db: Db,
}

impl Boards {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    /// Creates a board seeded with the default workflow columns.
    ///
    /// The board insert and its four columns commit in one transaction; a
    /// board without columns is never observable.
    pub fn create(&mut self, owner: &str, title: &str, description: Option<&str>) -> Result<Board> {
        board::validate_board_title(title).map_err(StoreError::Validation)?;
        if let Some(description) = description {
            board::validate_board_description(description).map_err(StoreError::Validation)?;
        }

        let new_board = Board::new(owner, title.trim(), description);

        let tx = self.db.conn.transaction()?;
        tx.execute(INSERT_BOARD, params![new_board.id, new_board.title, new_board.description, new_board.owner])?;
        for (position, name) in DEFAULT_COLUMNS.iter().enumerate() {
            let column = Column::new(new_board.id, name, position as i64);
            tx.execute(INSERT_COLUMN, params![column.id, column.board_id, column.name, column.position])?;
        }
        tx.commit()?;

        self.fetch(owner, new_board.id)?.ok_or_else(|| StoreError::BoardNotFound.into())
    }

    /// All boards of one owner, most recently updated first, with full
    /// trees loaded.
    pub fn list(&self, owner: &str) -> Result<Vec<Board>> {
        let mut stmt = self.db.conn.prepare(SELECT_BOARDS_BY_OWNER)?;
        let board_iter = stmt.query_map(params![owner], |row| {
            Ok(Board {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                owner: row.get(3)?,
                archived: row.get(4)?,
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
                columns: Vec::new(),
            })
        })?;

        let mut boards = Vec::new();
        for board in board_iter {
            boards.push(self.load_tree(board?)?);
        }
        Ok(boards)
    }

    /// One board with columns, tasks and comments in display order, or
    /// `None` when it does not exist or belongs to someone else.
    pub fn fetch(&self, owner: &str, board_id: Uuid) -> Result<Option<Board>> {
        let board = self
            .db
            .conn
            .query_row(SELECT_BOARD, params![board_id], |row| {
                Ok(Board {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    owner: row.get(3)?,
                    archived: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                    columns: Vec::new(),
                })
            })
            .optional()?;

        match board {
            Some(board) if board.owner == owner => Ok(Some(self.load_tree(board)?)),
            _ => Ok(None),
        }
    }

    /// Finds one of the owner's boards by id, id prefix or case-insensitive
    /// title. Prefixes match the hyphenated id string, so the short ids the
    /// board list prints are valid references.
    pub fn resolve(&self, owner: &str, reference: &str) -> Result<Option<Board>> {
        if let Ok(id) = Uuid::parse_str(reference) {
            return self.fetch(owner, id);
        }
        let prefix = reference.to_lowercase();
        Ok(self
            .list(owner)?
            .into_iter()
            .find(|b| b.id.to_string().starts_with(&prefix) || b.title.eq_ignore_ascii_case(reference)))
    }

    /// Applies a partial update and bumps `updated_at`.
    pub fn update(&mut self, owner: &str, board_id: Uuid, update: &BoardUpdate) -> Result<Board> {
        let current = self.fetch(owner, board_id)?.ok_or(StoreError::BoardNotFound)?;

        let title = match &update.title {
            Some(title) => {
                board::validate_board_title(title).map_err(StoreError::Validation)?;
                title.trim().to_string()
            }
            None => current.title,
        };
        let description = match &update.description {
            Some(Some(description)) => {
                board::validate_board_description(description).map_err(StoreError::Validation)?;
                Some(description.clone())
            }
            Some(None) => None,
            None => current.description,
        };
        let archived = update.archived.unwrap_or(current.archived);

        self.db.conn.execute(UPDATE_BOARD, params![title, description, archived, board_id])?;
        self.fetch(owner, board_id)?.ok_or_else(|| StoreError::BoardNotFound.into())
    }

    /// Deletes a board; columns, tasks and comments cascade.
    pub fn delete(&mut self, owner: &str, board_id: Uuid) -> Result<()> {
        ensure_owner(&self.db.conn, board_id, owner)?;
        let affected_rows = self.db.conn.execute(DELETE_BOARD, params![board_id])?;
        if affected_rows == 0 {
            return Err(StoreError::BoardNotFound.into());
        }
        Ok(())
    }

    fn load_tree(&self, mut board: Board) -> Result<Board> {
        let conn = &self.db.conn;

        let mut column_stmt = conn.prepare(SELECT_COLUMNS)?;
        let column_iter = column_stmt.query_map(params![board.id], |row| {
            Ok(Column {
                id: row.get(0)?,
                board_id: row.get(1)?,
                name: row.get(2)?,
                position: row.get(3)?,
                tasks: Vec::new(),
            })
        })?;

        let mut columns = Vec::new();
        for column in column_iter {
            let mut column = column?;
            column.tasks = self.load_column_tasks(conn, column.id)?;
            columns.push(column);
        }

        board.columns = columns;
        Ok(board)
    }

    fn load_column_tasks(&self, conn: &Connection, column_id: Uuid) -> Result<Vec<Task>> {
        let mut task_stmt = conn.prepare(SELECT_COLUMN_TASKS)?;
        let task_iter = task_stmt.query_map(params![column_id], |row| {
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
        })?;

        let mut tasks = Vec::new();
        for task in task_iter {
            let mut task = task?;
            task.comments = self.load_task_comments(conn, task.id)?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    fn load_task_comments(&self, conn: &Connection, task_id: Uuid) -> Result<Vec<Comment>> {
        let mut comment_stmt = conn.prepare(SELECT_TASK_COMMENTS)?;
        let comment_iter = comment_stmt.query_map(params![task_id], |row| {
            Ok(Comment {
                id: row.get(0)?,
                task_id: row.get(1)?,
                author: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut comments = Vec::new();
        for comment in comment_iter {
            comments.push(comment?);
        }
        Ok(comments)
    }
}

/// Ownership gate shared by every repository.
///
/// Succeeds only when the board exists and is owned by `owner`. Both
/// failure cases collapse into [`StoreError::BoardNotFound`] so callers
/// cannot distinguish foreign boards from missing ones.
pub(crate) fn ensure_owner(conn: &Connection, board_id: Uuid, owner: &str) -> Result<(), StoreError> {
    let board_owner: Option<String> = conn.query_row(SELECT_OWNER, params![board_id], |row| row.get(0)).optional()?;
    match board_owner {
        Some(board_owner) if board_owner == owner => Ok(()),
        _ => Err(StoreError::BoardNotFound),
    }
}
