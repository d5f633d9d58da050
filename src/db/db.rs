//! Database connection management.
//!
//! `Db` opens the board database under the application data directory,
//! enables foreign key enforcement (cascade deletes depend on it) and brings
//! the schema up to date before handing the connection to a repository.

use crate::db::migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "kanbo.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database with foreign keys on and all migrations applied.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let mut conn = Connection::open(db_file_path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        migrations::init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Raw connection for schema inspection; skips the migration run.
    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn = Connection::open(db_file_path)?;
        Ok(conn)
    }
}
