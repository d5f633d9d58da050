//! Core library modules for the kanbo application.
//!
//! Serves as the main entry point for all kanbo library components,
//! providing a centralized access point to the application's core
//! functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Board Model**: Boards, columns, tasks, comments and their invariants
//! - **Ordering**: Dense position model and reorder payloads
//! - **Move Resolution**: Drag gesture resolution into splice plans
//! - **Optimistic State**: In-memory board mirror applied ahead of persistence
//! - **User Interface**: Console rendering of boards and tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kanbo::db::boards::Boards;
//!
//! let mut boards = Boards::new()?;
//! let board = boards.create("alice", "Release planning", None)?;
//! # anyhow::Ok(())
//! ```

pub mod board;
pub mod config;
pub mod data_storage;
pub mod messages;
pub mod ordering;
pub mod resolver;
pub mod store;
pub mod view;
