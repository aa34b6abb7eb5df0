/// Connection Management Module
///
/// This module owns the lifecycle of the single SQLite connection used by
/// studentdb. The caller opens it explicitly, uses it through
/// `DatabaseManager`, and closes it (or lets `with_database` do both).

use crate::core::db::query::QueryResult;
use crate::core::{Result, StudentDbError};
use rusqlite::{Connection, Params, Row};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path understood by SQLite as "no file, keep everything in memory"
pub const IN_MEMORY: &str = ":memory:";

/// Options applied every time a connection is opened
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConnectOptions {
    /// Enforce declared foreign keys. SQLite leaves them unchecked by default.
    pub foreign_keys: bool,
}

/// Owns a single connection to one database file.
///
/// A freshly created manager is disconnected; every statement method returns
/// `StudentDbError::Connection` until `connect` has been called. Dropping a
/// connected manager closes the connection.
#[derive(Debug)]
pub struct DatabaseManager {
    path: PathBuf,
    options: ConnectOptions,
    connection: Option<Connection>,
}

impl DatabaseManager {
    /// Creates a disconnected manager for the database at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_options(path, ConnectOptions::default())
    }

    /// Creates a disconnected manager with explicit connect options
    pub fn with_options(path: impl AsRef<Path>, options: ConnectOptions) -> Self {
        DatabaseManager {
            path: path.as_ref().to_path_buf(),
            options,
            connection: None,
        }
    }

    /// Creates a manager and connects it immediately
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut manager = Self::new(path);
        manager.connect()?;
        Ok(manager)
    }

    /// Opens the connection.
    ///
    /// Calling this on an already connected manager replaces the previous
    /// connection, which is dropped.
    ///
    /// # Errors
    ///
    /// Returns `StudentDbError::Database` if the file cannot be opened or the
    /// connection pragmas cannot be applied.
    pub fn connect(&mut self) -> Result<()> {
        debug!("Opening database at {:?}", self.path);
        let conn = Connection::open(&self.path)?;

        let foreign_keys = if self.options.foreign_keys { "ON" } else { "OFF" };
        conn.execute_batch(&format!("PRAGMA foreign_keys = {};", foreign_keys))?;

        if self.connection.replace(conn).is_some() {
            debug!("Replaced existing connection to {:?}", self.path);
        }
        Ok(())
    }

    /// Closes the connection if open; does nothing otherwise
    pub fn close(&mut self) -> Result<()> {
        match self.connection.take() {
            Some(conn) => {
                debug!("Closing database at {:?}", self.path);
                conn.close().map_err(|(_, e)| {
                    StudentDbError::Connection(format!("Failed to close database: {}", e))
                })
            }
            None => Ok(()),
        }
    }

    /// Checks if there's an active database connection
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Path this manager opens
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the manager targets an in-memory database rather than a file
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }

    /// Borrows the open connection
    pub fn connection(&self) -> Result<&Connection> {
        self.connection.as_ref().ok_or_else(|| {
            StudentDbError::Connection(format!(
                "Database {:?} is not connected; call connect() first",
                self.path
            ))
        })
    }

    /// Executes one statement and returns every row it produced.
    ///
    /// Parameters are bound positionally, never spliced into the SQL text.
    /// The connection runs in autocommit mode, so each call outside of
    /// `transaction` is committed as soon as it finishes, reads included.
    ///
    /// # Errors
    ///
    /// Returns `StudentDbError::Connection` when not connected and
    /// `StudentDbError::Query` if the statement cannot be prepared or run.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<QueryResult> {
        let conn = self.connection()?;
        debug!(sql, "Executing statement");

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StudentDbError::Query(format!("Failed to prepare statement: {}", e)))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map(params, |row| {
                (0..column_count)
                    .map(|i| row.get::<_, rusqlite::types::Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| StudentDbError::Query(format!("Query execution failed: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StudentDbError::Query(format!("Result processing failed: {}", e)))?;

        Ok(QueryResult::new(columns, rows))
    }

    /// Runs a statement and maps every row through `f`
    pub fn query_rows<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connection()?;
        debug!(sql, "Querying rows");

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StudentDbError::Query(format!("Failed to prepare statement: {}", e)))?;
        let rows = stmt
            .query_map(params, f)
            .map_err(|e| StudentDbError::Query(format!("Query execution failed: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Rowid of the most recent successful INSERT on this connection
    pub fn last_insert_rowid(&self) -> Result<i64> {
        Ok(self.connection()?.last_insert_rowid())
    }

    /// Runs `f` inside a transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back otherwise.
    /// Must not be nested.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        let tx = self.connection()?.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }
}

/// Opens the database at `path`, runs `f` against it and closes it again.
///
/// The connection is closed whether or not `f` succeeds. If both `f` and
/// the close fail, the error from `f` is returned.
pub fn with_database<T, F>(path: impl AsRef<Path>, options: ConnectOptions, f: F) -> Result<T>
where
    F: FnOnce(&DatabaseManager) -> Result<T>,
{
    let mut manager = DatabaseManager::with_options(path, options);
    manager.connect()?;

    let outcome = f(&manager);
    let closed = manager.close();

    let value = outcome?;
    closed?;
    Ok(value)
}
