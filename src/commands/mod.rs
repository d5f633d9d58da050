//! Command-line interface definition and dispatch.
//!
//! Each subcommand lives in its own module with a `cmd` entry point; this
//! module only declares the clap surface and routes parsed arguments.

pub mod board;
pub mod column;
pub mod comment;
pub mod init;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod sync;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage boards")]
    Board(board::BoardArgs),
    #[command(about = "Manage board columns")]
    Column(column::ColumnArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage task comments")]
    Comment(comment::CommentArgs),
    #[command(about = "Push board ordering to the remote server")]
    Sync(sync::SyncArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Database migration utilities")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Board(args) => board::cmd(args),
            Commands::Column(args) => column::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Comment(args) => comment::cmd(args),
            Commands::Sync(args) => sync::cmd(args).await,
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
