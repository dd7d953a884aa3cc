//! Scoped store handle: one connection, one transaction per operation.

use std::path::Path;

use rusqlite::Connection;

use crate::schema::{self, SchemaError};

/// Owns the single connection used for one CLI invocation.
///
/// Opening runs schema creation and column migrations. The connection is
/// closed when the store is dropped.
#[derive(Debug)]
pub struct MediaStore {
    conn: Connection,
}

impl MediaStore {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_database(path)?,
        })
    }

    /// In-memory store with the full schema.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    /// Re-run table creation and migrations. Idempotent.
    pub fn initialize(&self) -> Result<(), SchemaError> {
        schema::initialize(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run one logical operation inside a transaction.
    ///
    /// Commits when `op` returns `Ok`. On `Err` the transaction is dropped
    /// uncommitted, which rolls it back.
    pub fn run<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<rusqlite::Error>,
    {
        let tx = self.conn.transaction()?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
