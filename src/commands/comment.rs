//! Task comment commands.
//!
//! Comments belong to their author; deletion is allowed for the author or
//! the board owner, which the comments repository enforces.

use crate::db::{boards::Boards, comments::Comments};
use crate::libs::{
    board::{Comment, Task},
    config::Config,
    messages::Message,
};
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct CommentArgs {
    #[command(subcommand)]
    command: CommentCommand,
}

#[derive(Debug, Subcommand)]
enum CommentCommand {
    /// Add a comment to a task
    Add {
        /// Board id, id prefix or title
        board: String,
        /// Task id, id prefix or title
        task: String,
        /// Comment text; prompted for when omitted
        content: Option<String>,
    },
    /// Delete a comment
    Delete {
        /// Board id, id prefix or title
        board: String,
        /// Task id, id prefix or title
        task: String,
        /// Comment id or id prefix
        comment: String,
    },
}

pub fn cmd(args: CommentArgs) -> Result<()> {
    match args.command {
        CommentCommand::Add { board, task, content } => handle_add(board, task, content),
        CommentCommand::Delete { board, task, comment } => handle_delete(board, task, comment),
    }
}

fn handle_add(board_ref: String, task_ref: String, content: Option<String>) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(task) = board.find_task(&task_ref) else {
        msg_error!(Message::TaskNotFoundRef(task_ref));
        return Ok(());
    };

    let content = match content {
        Some(content) => content,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCommentContent.to_string())
            .interact_text()?,
    };

    Comments::new()?.create(&user, task.id, &content)?;
    msg_success!(Message::CommentAdded(task.title.clone()));
    Ok(())
}

fn handle_delete(board_ref: String, task_ref: String, comment_ref: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(task) = board.find_task(&task_ref) else {
        msg_error!(Message::TaskNotFoundRef(task_ref));
        return Ok(());
    };
    let Some(comment) = find_comment(task, &comment_ref) else {
        msg_error!(Message::CommentNotFoundRef(comment_ref));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteComment.to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Comments::new()?.delete(&user, comment.id)?;
    msg_success!(Message::CommentDeleted);
    Ok(())
}

/// Finds a comment on a task by id or id prefix.
fn find_comment<'a>(task: &'a Task, reference: &str) -> Option<&'a Comment> {
    if let Ok(id) = Uuid::parse_str(reference) {
        return task.comments.iter().find(|c| c.id == id);
    }
    let prefix = reference.to_lowercase();
    task.comments.iter().find(|c| c.id.to_string().starts_with(&prefix))
}
