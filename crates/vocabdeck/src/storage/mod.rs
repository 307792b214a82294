//! Storage layer for vocabdeck.
//!
//! This module provides a `SQLite`-backed key-value store. Each key holds one
//! serialized document together with a BLAKE3 hash of its contents, so a
//! reader can tell a damaged value from a valid one.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A value read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    /// The stored document.
    pub value: String,
    /// Hash recorded when the document was written.
    pub value_hash: String,
}

impl StoredValue {
    /// Compute the BLAKE3 hash of `value`.
    #[must_use]
    pub fn compute_hash(value: &str) -> String {
        blake3::hash(value.as_bytes()).to_hex().to_string()
    }

    /// Check that the document still matches its recorded hash.
    #[must_use]
    pub fn is_intact(&self) -> bool {
        Self::compute_hash(&self.value) == self.value_hash
    }
}

/// Key-value storage engine.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        let row = self
            .conn
            .query_row(
                "SELECT value, value_hash FROM kv WHERE key = ?1",
                [key],
                |row| {
                    Ok(StoredValue {
                        value: row.get(0)?,
                        value_hash: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(row)
    }

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write(key, value, &StoredValue::compute_hash(value))
    }

    fn write(&self, key: &str, value: &str, value_hash: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.conn.execute(
            r"
            INSERT INTO kv (key, value, value_hash, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                value_hash = excluded.value_hash,
                updated_at = excluded.updated_at
            ",
            params![key, value, value_hash, updated_at],
        )?;
        debug!("Wrote {} bytes under key '{}'", value.len(), key);
        Ok(())
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_keys: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;

        let newest: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last_updated = newest
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_keys,
            last_updated,
            db_size_bytes,
        })
    }

    /// Write a value with an arbitrary recorded hash.
    #[cfg(test)]
    pub(crate) fn set_with_hash(&self, key: &str, value: &str, value_hash: &str) -> Result<()> {
        self.write(key, value, value_hash)
    }

    /// Drop the key-value table so every later write fails.
    #[cfg(test)]
    pub(crate) fn drop_kv_table(&self) -> Result<()> {
        self.conn.execute("DROP TABLE kv", [])?;
        Ok(())
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of stored keys.
    pub total_keys: i64,
    /// When any key was last written.
    pub last_updated: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
