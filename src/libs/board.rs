//! Core board domain types.
//!
//! A board owns ordered columns, a column owns ordered tasks, a task owns
//! comments. Sibling order is carried by `position`: within one parent the
//! positions are exactly `0..n-1` (dense, 0-based, no duplicates), and
//! ascending position is display order. Every store mutation restores this
//! invariant before it commits.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default workflow columns seeded into every new board, in display order.
pub const DEFAULT_COLUMNS: [&str; 4] = ["Backlog", "In Progress", "Review", "Done"];

pub const BOARD_TITLE_MIN: usize = 3;
pub const BOARD_TITLE_MAX: usize = 120;
pub const BOARD_DESCRIPTION_MAX: usize = 1000;
pub const COLUMN_NAME_MAX: usize = 80;
pub const TASK_TITLE_MAX: usize = 140;
pub const TASK_DESCRIPTION_MAX: usize = 2000;
pub const COMMENT_CONTENT_MAX: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner: String,
    pub archived: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub columns: Vec<Column>, // ascending position
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub position: i64,
    pub tasks: Vec<Task>, // ascending position
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub board_id: Uuid,
    pub column_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub assignee: Option<String>,
    pub position: i64,
    pub comments: Vec<Comment>, // ascending created_at
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: Option<NaiveDateTime>,
}

impl Board {
    pub fn new(owner: &str, title: &str, description: Option<&str>) -> Self {
        Board {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.map(str::to_string),
            owner: owner.to_string(),
            archived: false,
            created_at: None,
            updated_at: None,
            columns: Vec::new(),
        }
    }

    /// Finds a column by id, id prefix or case-insensitive name. Names win
    /// over id prefixes when both match.
    pub fn find_column(&self, reference: &str) -> Option<&Column> {
        if let Ok(id) = Uuid::parse_str(reference) {
            return self.columns.iter().find(|c| c.id == id);
        }
        if let Some(column) = self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(reference)) {
            return Some(column);
        }
        let prefix = reference.to_lowercase();
        self.columns.iter().find(|c| c.id.to_string().starts_with(&prefix))
    }

    /// Finds a task by id, id prefix or case-insensitive title, scanning
    /// board order. Titles win over id prefixes when both match.
    pub fn find_task(&self, reference: &str) -> Option<&Task> {
        if let Ok(id) = Uuid::parse_str(reference) {
            return self.columns.iter().flat_map(|c| c.tasks.iter()).find(|t| t.id == id);
        }
        if let Some(task) = self
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.title.eq_ignore_ascii_case(reference))
        {
            return Some(task);
        }
        let prefix = reference.to_lowercase();
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .find(|t| t.id.to_string().starts_with(&prefix))
    }

    /// Column currently holding the given task.
    pub fn column_of_task(&self, task_id: Uuid) -> Option<&Column> {
        self.columns.iter().find(|c| c.tasks.iter().any(|t| t.id == task_id))
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

impl Column {
    pub fn new(board_id: Uuid, name: &str, position: i64) -> Self {
        Column {
            id: Uuid::new_v4(),
            board_id,
            name: name.to_string(),
            position,
            tasks: Vec::new(),
        }
    }
}

impl Task {
    pub fn new(board_id: Uuid, column_id: Uuid, title: &str, position: i64) -> Self {
        Task {
            id: Uuid::new_v4(),
            board_id,
            column_id,
            title: title.to_string(),
            description: None,
            due_date: None,
            assignee: None,
            position,
            comments: Vec::new(),
        }
    }
}

impl Comment {
    pub fn new(task_id: Uuid, author: &str, content: &str) -> Self {
        Comment {
            id: Uuid::new_v4(),
            task_id,
            author: author.to_string(),
            content: content.to_string(),
            created_at: None,
        }
    }
}

pub fn validate_board_title(title: &str) -> Result<(), String> {
    let len = title.trim().chars().count();
    if len < BOARD_TITLE_MIN {
        return Err(format!("Board title must be at least {} characters", BOARD_TITLE_MIN));
    }
    if len > BOARD_TITLE_MAX {
        return Err(format!("Board title must be at most {} characters", BOARD_TITLE_MAX));
    }
    Ok(())
}

pub fn validate_board_description(description: &str) -> Result<(), String> {
    if description.chars().count() > BOARD_DESCRIPTION_MAX {
        return Err(format!("Board description must be at most {} characters", BOARD_DESCRIPTION_MAX));
    }
    Ok(())
}

pub fn validate_column_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err("Column name is required".to_string());
    }
    if len > COLUMN_NAME_MAX {
        return Err(format!("Column name must be at most {} characters", COLUMN_NAME_MAX));
    }
    Ok(())
}

pub fn validate_task_title(title: &str) -> Result<(), String> {
    let len = title.trim().chars().count();
    if len == 0 {
        return Err("Task title is required".to_string());
    }
    if len > TASK_TITLE_MAX {
        return Err(format!("Task title must be at most {} characters", TASK_TITLE_MAX));
    }
    Ok(())
}

pub fn validate_task_description(description: &str) -> Result<(), String> {
    if description.chars().count() > TASK_DESCRIPTION_MAX {
        return Err(format!("Task description must be at most {} characters", TASK_DESCRIPTION_MAX));
    }
    Ok(())
}

pub fn validate_comment_content(content: &str) -> Result<(), String> {
    let len = content.trim().chars().count();
    if len == 0 {
        return Err("Comment content is required".to_string());
    }
    if len > COMMENT_CONTENT_MAX {
        return Err(format!("Comment must be at most {} characters", COMMENT_CONTENT_MAX));
    }
    Ok(())
}
