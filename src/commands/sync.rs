//! Manual remote synchronization.
//!
//! Re-pushes the authoritative local ordering of one board, or of every
//! board, to the remote server. This is the recovery path after a push
//! failed during a move: the local store was not rolled back, so a plain
//! re-push converges the remote on the local order.

use crate::api::sync::SyncClient;
use crate::db::boards::Boards;
use crate::libs::{config::Config, messages::Message, store::BoardState};
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Board id, id prefix or title; every board when omitted
    board: Option<String>,
}

pub async fn cmd(args: SyncArgs) -> Result<()> {
    let config = Config::read()?;
    let user = config.current_user();
    let Some(remote) = &config.remote else {
        msg_warning!(Message::SyncNoRemote);
        return Ok(());
    };
    let client = SyncClient::new(remote);

    let boards = match args.board {
        Some(reference) => {
            let Some(board) = Boards::new()?.resolve(&user, &reference)? else {
                msg_error!(Message::BoardNotFoundRef(reference));
                return Ok(());
            };
            vec![board]
        }
        None => Boards::new()?.list(&user)?,
    };
    if boards.is_empty() {
        msg_info!(Message::NoBoardsFound);
        return Ok(());
    }

    for board in boards {
        let title = board.title.clone();
        msg_print!(Message::SyncingBoard(title.clone()));
        let state = BoardState::new(board);
        match push_board(&client, &state).await {
            Ok(()) => msg_success!(Message::SyncPushed(title)),
            Err(e) => msg_error!(Message::SyncFailed(e.to_string())),
        }
    }

    Ok(())
}

/// Pushes both ordering payloads for one board. Empty scopes are skipped,
/// the server rejects empty reorder batches.
async fn push_board(client: &SyncClient, state: &BoardState) -> Result<()> {
    if !state.board().columns.is_empty() {
        client.push_column_order(&state.column_order()).await?;
    }
    if state.board().task_count() > 0 {
        client.push_task_order(&state.task_order()).await?;
    }
    Ok(())
}
