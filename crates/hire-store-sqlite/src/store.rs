//! [`SqliteSlots`]: the SQLite implementation of [`SlotStorage`].

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use hire_core::storage::SlotStorage;
use rusqlite::{Connection, OptionalExtension as _};

use crate::{Error, Result, schema::SCHEMA};

/// Storage slots kept in a single SQLite file.
pub struct SqliteSlots {
  conn: Connection,
}

impl SqliteSlots {
  /// Open (or create) a slot file at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    tracing::debug!(path = %path.display(), "opened slot database");
    Self::init(conn)
  }

  /// Open an in-memory store, useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &Connection { &self.conn }
}

impl SlotStorage for SqliteSlots {
  type Error = Error;

  fn read(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn
      .query_row(
        "SELECT value FROM slots WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn write(&mut self, key: &str, value: &str) -> Result<()> {
    let written_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    self.conn.execute(
      "INSERT INTO slots (key, value, written_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET
         value      = excluded.value,
         written_at = excluded.written_at",
      rusqlite::params![key, value, written_at],
    )?;
    tracing::debug!(key, bytes = value.len(), "slot written");
    Ok(())
  }
}
