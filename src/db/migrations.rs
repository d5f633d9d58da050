//! Database schema migration management and versioning system.
//!
//! Evolves the board database schema over time while keeping existing data
//! intact. Applied versions are recorded in a `migrations` table, pending
//! versions run inside one transaction during connection setup.
//!
//! ## Features
//!
//! - **Version Tracking**: Records every applied migration with a timestamp
//! - **Automatic Application**: Pending migrations run on database open
//! - **Transaction Safety**: A failed migration rolls everything back
//! - **History Inspection**: Full audit trail for the migrations command
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kanbo::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("kanbo.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # anyhow::Ok(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table for applied schema versions.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change with its version and transformation logic.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all schema versions, applied in order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Defines the complete schema history. Versions must stay sequential;
    /// released migrations are never edited, only appended to.
    fn register_migrations(&mut self) {
        // Version 1: the board object graph.
        //
        // Sibling order lives in the position columns: dense 0-based within
        // one parent, maintained by the repositories on every mutation.
        // Deletes cascade down the tree.
        self.add_migration(1, "create_board_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS boards (
        id BLOB NOT NULL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        owner TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS columns (
        id BLOB NOT NULL PRIMARY KEY,
        board_id BLOB NOT NULL,
        name TEXT NOT NULL,
        position INTEGER NOT NULL,
        FOREIGN KEY (board_id) REFERENCES boards(id) ON DELETE CASCADE
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id BLOB NOT NULL PRIMARY KEY,
        board_id BLOB NOT NULL,
        column_id BLOB NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        due_date TIMESTAMP,
        position INTEGER NOT NULL,
        FOREIGN KEY (board_id) REFERENCES boards(id) ON DELETE CASCADE,
        FOREIGN KEY (column_id) REFERENCES columns(id) ON DELETE CASCADE
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS comments (
        id BLOB NOT NULL PRIMARY KEY,
        task_id BLOB NOT NULL,
        author TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE CASCADE
    )",
                [],
            )?;

            // Ownership listing and ordered child reads
            tx.execute("CREATE INDEX IF NOT EXISTS idx_boards_owner ON boards(owner)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_columns_board ON columns(board_id, position)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_board ON tasks(board_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_column ON tasks(column_id, position)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_comments_task ON comments(task_id, created_at)", [])?;

            Ok(())
        });

        // Version 2: task assignees.
        self.add_migration(2, "add_task_assignee", |tx| {
            tx.execute("ALTER TABLE tasks ADD COLUMN assignee TEXT", [])?;
            Ok(())
        });

        // Version 3: board archiving. Archived boards stay listed but are
        // flagged, nothing is deleted.
        self.add_migration(3, "add_board_archiving", |tx| {
            tx.execute("ALTER TABLE boards ADD COLUMN archived INTEGER NOT NULL DEFAULT 0", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every pending migration in version order.
    ///
    /// All pending versions run inside one transaction; a failure rolls the
    /// whole batch back and leaves the recorded version unchanged.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    /// Whether a specific schema version has been applied.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Development rollback: forgets migration records beyond the target
    /// version without reversing schema changes.
    #[cfg(debug_assertions)]
    pub fn rollback_to(&self, conn: &mut Connection, target_version: u32) -> Result<()> {
        let current_version = self.get_current_version(conn)?;

        if target_version >= current_version {
            msg_info!(Message::NothingToRollback);
            return Ok(());
        }

        msg_info!(Message::RollingBack(current_version, target_version));
        conn.execute("DELETE FROM migrations WHERE version > ?1", params![target_version])?;
        msg_success!(Message::RollbackCompleted(target_version));
        Ok(())
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings a connection up to the latest schema version.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

/// Current schema version of the given database.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// Whether the database is behind the latest registered version.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    let latest = manager.migrations.last().map(|m| m.version).unwrap_or(0);
    Ok(current < latest)
}
