//! Terminal rendering for boards, tasks and comments.

use crate::libs::board::{Board, Task};
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};
use uuid::Uuid;

pub struct View {}

impl View {
    /// Short display form of an entity id.
    pub fn short_id(id: &Uuid) -> String {
        id.to_string().chars().take(8).collect()
    }

    pub fn boards(boards: &[Board]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "COLUMNS", "TASKS", "UPDATED", "ARCHIVED"]);
        for board in boards {
            table.add_row(row![
                Self::short_id(&board.id),
                board.title,
                board.columns.len(),
                board.task_count(),
                board.updated_at.map(|at| at.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default(),
                if board.archived { "yes" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Renders the kanban grid: one table column per board column, tasks
    /// stacked in position order.
    pub fn board(board: &Board) -> Result<()> {
        let mut table = Table::new();

        let header: Vec<Cell> = board
            .columns
            .iter()
            .map(|column| Cell::new(&format!("{} ({})", column.name, column.tasks.len())))
            .collect();
        table.add_row(Row::new(header));

        let depth = board.columns.iter().map(|column| column.tasks.len()).max().unwrap_or(0);
        for index in 0..depth {
            let cells: Vec<Cell> = board
                .columns
                .iter()
                .map(|column| match column.tasks.get(index) {
                    Some(task) => Cell::new(&Self::task_cell(task)),
                    None => Cell::new(""),
                })
                .collect();
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    pub fn task(task: &Task, column_name: &str) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", Self::short_id(&task.id)]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["COLUMN", column_name]);
        table.add_row(row!["POSITION", task.position]);
        if let Some(description) = &task.description {
            table.add_row(row!["DESCRIPTION", description]);
        }
        if let Some(due_date) = &task.due_date {
            table.add_row(row!["DUE", due_date.format("%Y-%m-%d")]);
        }
        if let Some(assignee) = &task.assignee {
            table.add_row(row!["ASSIGNEE", assignee]);
        }
        table.printstd();

        if !task.comments.is_empty() {
            let mut comments = Table::new();
            comments.add_row(row!["ID", "AUTHOR", "WHEN", "COMMENT"]);
            for comment in &task.comments {
                comments.add_row(row![
                    Self::short_id(&comment.id),
                    comment.author,
                    comment.created_at.map(|at| at.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default(),
                    comment.content
                ]);
            }
            comments.printstd();
        }

        Ok(())
    }

    fn task_cell(task: &Task) -> String {
        let mut text = format!("{} {}", Self::short_id(&task.id), task.title);
        if let Some(due_date) = &task.due_date {
            text.push_str(&format!("\ndue {}", due_date.format("%Y-%m-%d")));
        }
        if !task.comments.is_empty() {
            text.push_str(&format!("\n{} comment(s)", task.comments.len()));
        }
        text
    }
}
