//! Display implementation for kanbo application messages.
//!
//! Converts structured `Message` variants into the human-readable text shown
//! in the terminal. All user-facing wording lives here, in one place, so the
//! rest of the application deals only in typed messages.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === BOARD MESSAGES ===
            Message::BoardCreated(title) => format!("Board '{}' created with default columns", title),
            Message::BoardUpdated(title) => format!("Board '{}' updated", title),
            Message::BoardDeleted(title) => format!("Board '{}' deleted", title),
            Message::BoardArchived(title) => format!("Board '{}' archived", title),
            Message::BoardUnarchived(title) => format!("Board '{}' restored from archive", title),
            Message::BoardNotFoundRef(reference) => format!("No board matches '{}'", reference),
            Message::BoardHasNoColumns(title) => format!("Board '{}' has no columns. Add one with 'kanbo column add'.", title),
            Message::BoardsHeader => "Boards:".to_string(),
            Message::NoBoardsFound => "No boards yet. Create one with 'kanbo board create'.".to_string(),
            Message::ConfirmDeleteBoard(title) => format!("Delete board '{}' with all its columns, tasks and comments?", title),
            Message::PromptBoardTitle => "Board title".to_string(),
            Message::PromptBoardDescription => "Description (optional)".to_string(),

            // === COLUMN MESSAGES ===
            Message::ColumnCreated(name) => format!("Column '{}' added", name),
            Message::ColumnRenamed(old, new) => format!("Column '{}' renamed to '{}'", old, new),
            Message::ColumnDeleted(name) => format!("Column '{}' deleted", name),
            Message::ColumnMoved(name) => format!("Column '{}' moved", name),
            Message::ColumnNotFoundRef(reference) => format!("No column matches '{}'", reference),
            Message::ConfirmDeleteColumn(name, count) => format!("Delete column '{}' and its {} task(s)?", name, count),

            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted", title),
            Message::TaskMoved(title, column) => format!("Task '{}' moved to '{}'", title, column),
            Message::TaskNotFoundRef(reference) => format!("No task matches '{}'", reference),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD, empty for none)".to_string(),
            Message::PromptTaskAssignee => "Assignee (empty for none)".to_string(),

            // === COMMENT MESSAGES ===
            Message::CommentAdded(title) => format!("Comment added to '{}'", title),
            Message::CommentDeleted => "Comment deleted".to_string(),
            Message::CommentNotFoundRef(reference) => format!("No comment matches '{}'", reference),
            Message::ConfirmDeleteComment => "Delete this comment?".to_string(),
            Message::PromptCommentContent => "Comment".to_string(),

            // === MOVE MESSAGES ===
            Message::NothingToMove => "Nothing to move.".to_string(),
            Message::MoveTargetRequired => "Pass --onto <task> or --into <column> to choose a destination.".to_string(),

            // === SYNC MESSAGES ===
            Message::SyncPushed(title) => format!("Board '{}' pushed to remote", title),
            Message::SyncFailed(detail) => format!("Remote sync failed: {}. Local state kept; run 'kanbo sync' to retry.", detail),
            Message::SyncNoRemote => "Remote server is not configured. Run 'kanbo init' to set it up.".to_string(),
            Message::SyncingBoard(title) => format!("Syncing board '{}'...", title),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleProfile => "Profile".to_string(),
            Message::ConfigModuleRemote => "Remote server".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptUserId => "User id".to_string(),
            Message::PromptUserName => "Display name".to_string(),
            Message::PromptRemoteApiUrl => "Remote API URL".to_string(),
            Message::PromptRemoteAuthToken => "Auth token".to_string(),
            Message::ConfirmDeleteConfig => "Delete the existing configuration?".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs migration; it will be applied on the next command".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NothingToRollback => "Nothing to roll back".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from version {} to {}", from, to),
            Message::RollbackCompleted(version) => format!("Rollback to version {} completed", version),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === ERROR MESSAGES ===
            Message::RemoteStatusError(status, detail) => format!("Remote returned {}: {}", status, detail),
            Message::InvalidDate(date) => format!("Invalid date '{}'. Expected YYYY-MM-DD.", date),
        };
        write!(f, "{}", text)
    }
}
