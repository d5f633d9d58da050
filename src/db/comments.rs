//! Comment repository.
//!
//! Comments hang off tasks and are ordered by creation time, not by
//! position. Creating one requires board ownership; deleting one is open
//! to the comment's author or the board owner, nobody else.

use crate::db::boards::ensure_owner;
use crate::db::db::Db;
use crate::db::tasks::task_refs;
use crate::db::StoreError;
use crate::libs::board::{self, Comment};
use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

const INSERT_COMMENT: &str = "INSERT INTO comments (id, task_id, author, content, created_at)
    VALUES (?1, ?2, ?3, ?4, datetime(CURRENT_TIMESTAMP, 'localtime'))";
const SELECT_COMMENT: &str = "SELECT id, task_id, author, content, created_at FROM comments WHERE id = ?1";
const SELECT_BOARD_OWNER: &str = "SELECT owner FROM boards WHERE id = ?1";
const DELETE_COMMENT: &str = "DELETE FROM comments WHERE id = ?1";

pub struct Comments {
    db: Db,
}

impl Comments {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    /// Adds a comment authored by `user` to a task on one of their boards.
    pub fn create(&mut self, user: &str, task_id: Uuid, content: &str) -> Result<Comment> {
        board::validate_comment_content(content).map_err(StoreError::Validation)?;
        let (board_id, _) = task_refs(&self.db.conn, task_id)?;
        ensure_owner(&self.db.conn, board_id, user)?;

        let comment = Comment::new(task_id, user, content.trim());
        self.db
            .conn
            .execute(INSERT_COMMENT, params![comment.id, comment.task_id, comment.author, comment.content])?;

        self.fetch(comment.id)?.ok_or_else(|| StoreError::CommentNotFound.into())
    }

    /// Deletes a comment on behalf of its author or the board owner.
    pub fn delete(&mut self, user: &str, comment_id: Uuid) -> Result<()> {
        let comment = self.fetch(comment_id)?.ok_or(StoreError::CommentNotFound)?;
        let (board_id, _) = task_refs(&self.db.conn, comment.task_id)?;
        let owner: Option<String> = self
            .db
            .conn
            .query_row(SELECT_BOARD_OWNER, params![board_id], |row| row.get(0))
            .optional()?;

        if comment.author != user && owner.as_deref() != Some(user) {
            return Err(StoreError::NotAllowed.into());
        }

        self.db.conn.execute(DELETE_COMMENT, params![comment_id])?;
        Ok(())
    }

    fn fetch(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let comment = self
            .db
            .conn
            .query_row(SELECT_COMMENT, params![comment_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    task_id: row.get(1)?,
                    author: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })
            .optional()?;
        Ok(comment)
    }
}
