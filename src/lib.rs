//! # Kanbo - Kanban Boards in the Terminal
//!
//! A command-line kanban tool for managing boards, columns, tasks and
//! comments, with drag-style reordering and optional sync to a board server.
//!
//! ## Features
//!
//! - **Boards**: Create and manage kanban boards with default workflow columns
//! - **Ordering**: Dense 0-based positions maintained on every move
//! - **Optimistic Moves**: Moves render immediately, persistence follows
//! - **Atomic Reorders**: Batched position updates applied all-or-nothing
//! - **Server Sync**: Optional push of board orderings to a remote server
//! - **Comments**: Task discussion threads with author/owner deletion rules
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kanbo::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
