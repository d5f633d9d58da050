//! API client modules for remote board synchronization.
//!
//! kanbo works fully offline; when a remote board server is configured,
//! the [`sync`] client pushes reorder batches to it after local moves so
//! other clients of the same server converge on the new order.

pub mod sync;

pub use sync::{RemoteConfig, SyncClient};
