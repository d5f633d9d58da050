//! Column commands, including the column reorder gesture.
//!
//! `column move` runs the full pipeline: resolve the drop against the
//! current board snapshot, apply the splice optimistically, render the new
//! layout, persist the complete column order and push it to the remote.
//! A resolution of `None` stops before any store or sync call.

use crate::api::sync::SyncClient;
use crate::db::{boards::Boards, columns::Columns};
use crate::libs::{
    config::Config,
    messages::Message,
    resolver::{self, DropTarget},
    store::BoardState,
    view::View,
};
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ColumnArgs {
    #[command(subcommand)]
    command: ColumnCommand,
}

#[derive(Debug, Subcommand)]
enum ColumnCommand {
    /// Add a column at the end of a board
    Add {
        /// Board id, id prefix or title
        board: String,
        /// Column name
        name: String,
    },
    /// Rename a column
    Rename {
        /// Board id, id prefix or title
        board: String,
        /// Column id or name
        column: String,
        /// New column name
        name: String,
    },
    /// Move a column onto another column's slot
    Move {
        /// Board id, id prefix or title
        board: String,
        /// Column id or name to move
        column: String,
        /// Column whose slot the moved column takes
        #[arg(long, value_name = "COLUMN")]
        onto: String,
    },
    /// Delete a column and the tasks on it
    Delete {
        /// Board id, id prefix or title
        board: String,
        /// Column id or name
        column: String,
    },
}

pub async fn cmd(args: ColumnArgs) -> Result<()> {
    match args.command {
        ColumnCommand::Add { board, name } => handle_add(board, name),
        ColumnCommand::Rename { board, column, name } => handle_rename(board, column, name),
        ColumnCommand::Move { board, column, onto } => handle_move(board, column, onto).await,
        ColumnCommand::Delete { board, column } => handle_delete(board, column),
    }
}

fn handle_add(board_ref: String, name: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };

    let column = Columns::new()?.create(&user, board.id, &name)?;
    msg_success!(Message::ColumnCreated(column.name));
    Ok(())
}

fn handle_rename(board_ref: String, column_ref: String, name: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(column) = board.find_column(&column_ref) else {
        msg_error!(Message::ColumnNotFoundRef(column_ref));
        return Ok(());
    };

    let old_name = column.name.clone();
    let column = Columns::new()?.rename(&user, column.id, &name)?;
    msg_success!(Message::ColumnRenamed(old_name, column.name));
    Ok(())
}

async fn handle_move(board_ref: String, column_ref: String, onto: String) -> Result<()> {
    let config = Config::read()?;
    let user = config.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(column) = board.find_column(&column_ref) else {
        msg_error!(Message::ColumnNotFoundRef(column_ref));
        return Ok(());
    };
    let (column_id, column_name) = (column.id, column.name.clone());
    let Some(over) = board.find_column(&onto) else {
        msg_error!(Message::ColumnNotFoundRef(onto));
        return Ok(());
    };
    let target = DropTarget::Column(over.id);

    let Some(mv) = resolver::resolve_column_move(&board, column_id, target) else {
        msg_info!(Message::NothingToMove);
        return Ok(());
    };

    let mut state = BoardState::new(board);
    state.apply_column_move(&mv);
    View::board(state.board())?;

    Columns::new()?.reorder(&user, &state.column_order())?;

    if let Some(remote) = &config.remote {
        if let Err(e) = SyncClient::new(remote).push_column_order(&state.column_order()).await {
            msg_error!(Message::SyncFailed(e.to_string()));
        }
    }

    msg_success!(Message::ColumnMoved(column_name));
    Ok(())
}

fn handle_delete(board_ref: String, column_ref: String) -> Result<()> {
    let user = Config::read()?.current_user();
    let Some(board) = Boards::new()?.resolve(&user, &board_ref)? else {
        msg_error!(Message::BoardNotFoundRef(board_ref));
        return Ok(());
    };
    let Some(column) = board.find_column(&column_ref) else {
        msg_error!(Message::ColumnNotFoundRef(column_ref));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteColumn(column.name.clone(), column.tasks.len()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Columns::new()?.delete(&user, column.id)?;
    msg_success!(Message::ColumnDeleted(column.name.clone()));
    Ok(())
}
