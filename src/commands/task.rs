//! Task commands, including the task drag gesture.
//!
//! `task move` mirrors a drag-and-drop: `--onto <task>` drops onto another
//! task and takes its slot, `--into <column>` drops into a column's open
//! area and appends. The resolved splice is applied to the board mirror
//! first, then persisted as a complete reorder batch and pushed to the
//! remote when one is configured.

use crate::api::sync::SyncClient;
use crate::db::{
    boards::Boards,
    tasks::{TaskUpdate, Tasks},
};
use crate::libs::{
    board::Task,
    config::Config,
    messages::Message,
    resolver::{self, DropTarget},
    store::BoardState,
    view::View,
};
use crate::{msg_error, msg_error_anyhow, msg_info, msg_success};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Add a task to a board
    Add(AddTaskArgs),
    /// Edit a task's fields
    Edit {
        /// Board id, id prefix or title
        board: String,
        /// Task id, id prefix or title
        task: String,
    },
    /// Move a task to another slot or column
    Move(MoveTaskArgs),
    /// Show a task with its comments
    Show {
        /// Board id, id prefix or title
        board: String,
        /// Task id, id prefix or title
        task: String,
    },
    /// Delete a task
    Delete {
        /// Board id, id prefix or title
        board: String,
        /// Task id, id prefix or title
        task: String,
    },
}

#[derive(Debug, Args)]
pub struct AddTaskArgs {
    /// Board id, id prefix or title
    board: String,
    /// Task title; prompted for when omitted
    title: Option<String>,
    /// Destination column (defaults to the first column)
    #[arg(short, long)]
    column: Option<String>,
    /// Task description
    #[arg(short, long)]
    description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<String>,
    /// Assignee user id
    #[arg(short, long)]
    assignee: Option<String>,
}

#[derive(Debug, Args)]
pub struct MoveTaskArgs {
    /// Board id, id prefix or title
    board: String,
    /// Task id, id prefix or title to move
    task: String,
    /// Drop the task onto another task, taking its slot
    #[arg(long, value_name = "TASK", conflicts_with = "into")]
    onto: Option<String>,
    /// Drop the task into a column, appending after its last task
    #[arg(long, value_name = "COLUMN")]
    into: Option<String>,
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        TaskCommand::Add(args) => handle_add(args),
        TaskCommand::Edit { board, task } => handle_edit(board, task),
        TaskCommand::Move(args) => handle_move(args).await,
        TaskCommand::Show { board, task } => handle_show(board, task),
        TaskCommand::Delete { board, task } => handle_delete(board, task),
    }
}

fn handle_add(args: AddTaskArgs) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &args.board)? else {
        msg_error!(Message::BoardNotFoundRef(args.board));
        return Ok(());
    };

    let column = match &args.column {
        Some(reference) => {
            let Some(column) = board.find_column(reference) else {
                msg_error!(Message::ColumnNotFoundRef(reference.clone()));
                return Ok(());
            };
            column
        }
        None => {
            let Some(column) = board.columns.first() else {
                msg_error!(Message::BoardHasNoColumns(board.title.clone()));
                return Ok(());
            };
            column
        }
    };

    let (title, description) = match args.title {
        Some(title) => (title, args.description),
        None => {
            let title: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskTitle.to_string())
                .interact_text()?;
            let description: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDescription.to_string())
                .allow_empty(true)
                .interact_text()?;
            (title, if description.is_empty() { None } else { Some(description) })
        }
    };

    let mut task = Task::new(board.id, column.id, &title, column.tasks.len() as i64);
    task.description = description;
    task.due_date = args.due.as_deref().map(parse_due).transpose()?;
    task.assignee = args.assignee;

    let task = Tasks::new()?.create(&user, &task)?;
    msg_success!(Message::TaskCreated(task.title));
    Ok(())
}

fn handle_edit(board_ref: String, task_ref: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(task) = board.find_task(&task_ref) else {
        msg_error!(Message::TaskNotFoundRef(task_ref));
        return Ok(());
    };

    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(task.title.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(task.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let due: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let assignee: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskAssignee.to_string())
        .default(task.assignee.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let description = if description.is_empty() { None } else { Some(description) };
    let due_date = if due.is_empty() { None } else { Some(parse_due(&due)?) };
    let assignee = if assignee.is_empty() { None } else { Some(assignee) };

    let mut update = TaskUpdate::default();
    if title != task.title {
        update.title = Some(title);
    }
    if description != task.description {
        update.description = Some(description);
    }
    if due_date != task.due_date {
        update.due_date = Some(due_date);
    }
    if assignee != task.assignee {
        update.assignee = Some(assignee);
    }
    if update.title.is_none() && update.description.is_none() && update.due_date.is_none() && update.assignee.is_none() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let task = Tasks::new()?.update(&user, task.id, &update)?;
    msg_success!(Message::TaskUpdated(task.title));
    Ok(())
}

async fn handle_move(args: MoveTaskArgs) -> Result<()> {
    let config = Config::read()?;
    let user = config.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &args.board)? else {
        msg_error!(Message::BoardNotFoundRef(args.board));
        return Ok(());
    };
    let Some(task) = board.find_task(&args.task) else {
        msg_error!(Message::TaskNotFoundRef(args.task));
        return Ok(());
    };
    let (task_id, task_title) = (task.id, task.title.clone());

    let target = match (&args.onto, &args.into) {
        (Some(reference), _) => {
            let Some(over) = board.find_task(reference) else {
                msg_error!(Message::TaskNotFoundRef(reference.clone()));
                return Ok(());
            };
            DropTarget::Task(over.id)
        }
        (None, Some(reference)) => {
            let Some(column) = board.find_column(reference) else {
                msg_error!(Message::ColumnNotFoundRef(reference.clone()));
                return Ok(());
            };
            DropTarget::ColumnBody(column.id)
        }
        (None, None) => {
            msg_info!(Message::MoveTargetRequired);
            return Ok(());
        }
    };

    let Some(mv) = resolver::resolve_task_move(&board, task_id, target) else {
        msg_info!(Message::NothingToMove);
        return Ok(());
    };

    let mut state = BoardState::new(board);
    state.apply_task_move(&mv);
    View::board(state.board())?;

    Tasks::new()?.reorder(&user, &state.task_order())?;

    if let Some(remote) = &config.remote {
        if let Err(e) = SyncClient::new(remote).push_task_order(&state.task_order()).await {
            msg_error!(Message::SyncFailed(e.to_string()));
        }
    }

    let destination = state
        .board()
        .columns
        .iter()
        .find(|c| c.id == mv.to_column)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    msg_success!(Message::TaskMoved(task_title, destination));
    Ok(())
}

fn handle_show(board_ref: String, task_ref: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(task) = board.find_task(&task_ref) else {
        msg_error!(Message::TaskNotFoundRef(task_ref));
        return Ok(());
    };

    let column_name = board.column_of_task(task.id).map(|c| c.name.clone()).unwrap_or_default();
    View::task(task, &column_name)?;
    Ok(())
}

fn handle_delete(board_ref: String, task_ref: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(task) = board.find_task(&task_ref) else {
        msg_error!(Message::TaskNotFoundRef(task_ref));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Tasks::new()?.delete(&user, task.id)?;
    msg_success!(Message::TaskDeleted(task.title.clone()));
    Ok(())
}

/// Parses a YYYY-MM-DD date into a midnight timestamp.
fn parse_due(date_str: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| msg_error_anyhow!(Message::InvalidDate(date_str.to_string())))?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(date_str.to_string())))
}
