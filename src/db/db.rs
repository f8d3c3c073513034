use crate::db::migrations::init_with_migrations;
use crate::db::record::Record;
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{Connection, Params};
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "staffdesk.db";

/// One open SQLite connection.
///
/// Dropping a `Db` closes the connection. The web layer creates one per
/// request; the CLI creates one per command.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database file without touching the schema.
    ///
    /// Foreign-key enforcement is switched off on every connection: deleting
    /// a department, position or employee removes exactly that row and
    /// leaves the rows pointing at it alone.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", false)?;

        Ok(Db { conn })
    }

    /// Opens the database file and applies pending migrations.
    pub fn init(path: impl AsRef<Path>) -> Result<Db> {
        let mut db = Self::open(path)?;
        init_with_migrations(&mut db.conn)?;
        Ok(db)
    }

    /// Runs a read query with positional parameters.
    ///
    /// No matching rows is an empty vector, never an error.
    pub fn execute_query<P: Params>(&self, sql: &str, params: P) -> rusqlite::Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect::<Vec<_>>().into();
        let width = columns.len();

        let rows = stmt.query_map(params, |row| (0..width).map(|idx| row.get::<_, Value>(idx)).collect::<rusqlite::Result<Vec<_>>>())?;

        let mut records = Vec::new();
        for values in rows {
            records.push(Record::new(Arc::clone(&columns), values?));
        }
        Ok(records)
    }

    /// Runs an insert, update or delete and returns the number of affected
    /// rows. The connection is in autocommit mode, so the change is committed
    /// when this returns; a failing statement is an error, never a silent
    /// "false".
    pub fn execute_mutation<P: Params>(&self, sql: &str, params: P) -> rusqlite::Result<usize> {
        self.conn.execute(sql, params)
    }

    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}
