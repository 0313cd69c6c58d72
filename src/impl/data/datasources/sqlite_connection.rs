use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use fractic_server_error::ServerError;
use rusqlite::Connection;

use crate::errors::{DatabaseOpenFailed, DatabaseQueryFailed};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sender (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT,
        email TEXT,
        phone TEXT
    );
    CREATE TABLE IF NOT EXISTS client (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT,
        email TEXT
    );
    CREATE TABLE IF NOT EXISTS footer_message (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        message TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS invoice (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sender_id INTEGER NOT NULL REFERENCES sender(id),
        client_id INTEGER NOT NULL REFERENCES client(id),
        footer_message_id INTEGER REFERENCES footer_message(id),
        paid INTEGER NOT NULL DEFAULT 0,
        date_created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE IF NOT EXISTS invoice_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        invoice_id INTEGER NOT NULL REFERENCES invoice(id) ON DELETE CASCADE,
        item_name TEXT NOT NULL,
        amount REAL NOT NULL,
        cost_per_unit REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS invoice_item_invoice_id ON invoice_item(invoice_id);
";

/// Shared handle to the SQLite database. Cloning shares the same connection.
#[derive(Clone)]
pub(crate) struct SqliteConnection {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteConnection {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let display = path.as_ref().display().to_string();
        let conn = Connection::open(path.as_ref())
            .map_err(|e| DatabaseOpenFailed::with_debug(&display, &e))?;
        tracing::debug!(path = %path.as_ref().display(), "opened invoice database");
        Self::init(conn, &display)
    }

    pub(crate) fn open_in_memory() -> Result<Self, ServerError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseOpenFailed::with_debug(":memory:", &e))?;
        Self::init(conn, ":memory:")
    }

    fn init(conn: Connection, display: &str) -> Result<Self, ServerError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .and_then(|_| conn.execute_batch(SCHEMA))
            .map_err(|e| DatabaseOpenFailed::with_debug(display, &e))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection, labelling any failure with `operation`.
    pub(crate) fn with_conn<R, F>(&self, operation: &str, f: F) -> Result<R, ServerError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DatabaseQueryFailed::with_debug(operation, &e))?;
        tracing::debug!(operation, "running statement");
        f(&conn).map_err(|e| DatabaseQueryFailed::with_debug(operation, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_all_tables() {
        let db = SqliteConnection::open_in_memory().unwrap();
        let mut tables = db
            .with_conn("list tables", |conn| {
                let mut stmt =
                    conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            })
            .unwrap();
        tables.retain(|t| t != "sqlite_sequence");
        tables.sort();
        assert_eq!(
            tables,
            vec!["client", "footer_message", "invoice", "invoice_item", "sender"]
        );
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let db = SqliteConnection::open_in_memory().unwrap();
        let result = db.with_conn("insert orphan invoice", |conn| {
            conn.execute(
                "INSERT INTO invoice (sender_id, client_id) VALUES (41, 42)",
                [],
            )
        });
        assert!(result.is_err());
    }

    #[test]
    fn reopening_a_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.db");
        {
            let db = SqliteConnection::open(&path).unwrap();
            db.with_conn("insert", |conn| {
                conn.execute("INSERT INTO footer_message (message) VALUES ('Thanks!')", [])
            })
            .unwrap();
        }
        let db = SqliteConnection::open(&path).unwrap();
        let count: i64 = db
            .with_conn("count", |conn| {
                conn.query_row("SELECT COUNT(*) FROM footer_message", [], |row| row.get(0))
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
