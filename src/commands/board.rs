//! Board lifecycle commands: create, list, show, edit, archive, delete.

use crate::db::boards::{BoardUpdate, Boards};
use crate::libs::{config::Config, messages::Message, view::View};
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct BoardArgs {
    #[command(subcommand)]
    command: Option<BoardCommand>,
}

#[derive(Debug, Subcommand)]
enum BoardCommand {
    /// Create a new board with the default workflow columns
    Create {
        /// Board title
        title: String,
        /// Board description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List your boards
    List,
    /// Show a board as a kanban grid
    Show {
        /// Board id, id prefix or title
        board: String,
    },
    /// Edit a board's title and description
    Edit {
        /// Board id, id prefix or title
        board: String,
    },
    /// Archive a board
    Archive {
        /// Board id, id prefix or title
        board: String,
    },
    /// Restore an archived board
    Unarchive {
        /// Board id, id prefix or title
        board: String,
    },
    /// Delete a board with everything on it
    Delete {
        /// Board id, id prefix or title
        board: String,
    },
}

pub fn cmd(args: BoardArgs) -> Result<()> {
    match args.command {
        Some(BoardCommand::Create { title, description }) => handle_create(title, description),
        Some(BoardCommand::List) | None => handle_list(),
        Some(BoardCommand::Show { board }) => handle_show(board),
        Some(BoardCommand::Edit { board }) => handle_edit(board),
        Some(BoardCommand::Archive { board }) => handle_archive(board, true),
        Some(BoardCommand::Unarchive { board }) => handle_archive(board, false),
        Some(BoardCommand::Delete { board }) => handle_delete(board),
    }
}

fn handle_create(title: String, description: Option<String>) -> Result<()> {
    let user = Config::read()?.current_user();
    let board = Boards::new()?.create(&user, &title, description.as_deref())?;
    msg_success!(Message::BoardCreated(board.title));
    Ok(())
}

fn handle_list() -> Result<()> {
    let user = Config::read()?.current_user();
    let boards = Boards::new()?.list(&user)?;
    if boards.is_empty() {
        msg_info!(Message::NoBoardsFound);
        return Ok(());
    }
    msg_print!(Message::BoardsHeader, true);
    View::boards(&boards)?;
    Ok(())
}

fn handle_show(reference: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &reference)? else {
        msg_error!(Message::BoardNotFoundRef(reference));
        return Ok(());
    };
    View::board(&board)?;
    Ok(())
}

fn handle_edit(reference: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let mut boards = Boards::new()?;
    let Some(board) = boards.resolve(&user, &reference)? else {
        msg_error!(Message::BoardNotFoundRef(reference));
        return Ok(());
    };

    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptBoardTitle.to_string())
        .default(board.title.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptBoardDescription.to_string())
        .default(board.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let description = if description.is_empty() { None } else { Some(description) };

    let mut update = BoardUpdate::default();
    if title != board.title {
        update.title = Some(title);
    }
    if description != board.description {
        update.description = Some(description);
    }
    if update.title.is_none() && update.description.is_none() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let updated = boards.update(&user, board.id, &update)?;
    msg_success!(Message::BoardUpdated(updated.title));
    Ok(())
}

fn handle_archive(reference: String, archived: bool) -> Result<()> {
    let user = Config::read()?.current_user();
    let mut boards = Boards::new()?;
    let Some(board) = boards.resolve(&user, &reference)? else {
        msg_error!(Message::BoardNotFoundRef(reference));
        return Ok(());
    };

    let update = BoardUpdate {
        archived: Some(archived),
        ..BoardUpdate::default()
    };
    let board = boards.update(&user, board.id, &update)?;
    if archived {
        msg_success!(Message::BoardArchived(board.title));
    } else {
        msg_success!(Message::BoardUnarchived(board.title));
    }
    Ok(())
}

fn handle_delete(reference: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let mut boards = Boards::new()?;
    let Some(board) = boards.resolve(&user, &reference)? else {
        msg_error!(Message::BoardNotFoundRef(reference));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteBoard(board.title.clone()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    boards.delete(&user, board.id)?;
    msg_success!(Message::BoardDeleted(board.title));
    Ok(())
}
