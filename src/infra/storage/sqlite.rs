use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::domain::errors::StorageError;
use crate::infra::storage::schema::{init_db, open_connection};
use crate::usecase::ports::storage::KeyValueStore;

/// Key-value rows in a local SQLite file. A connection is opened per call.
pub struct SqliteKvStore {
    pub db_path: PathBuf,
}

impl SqliteKvStore {
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        init_db(db_path).map_err(|err| StorageError::Open(format!("{err:#}")))?;
        Ok(Self {
            db_path: db_path.to_path_buf(),
        })
    }
}

fn read_value(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("failed to read key: {key}"))
}

fn write_value(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO kv_store(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        params![key, value],
    )
    .with_context(|| format!("failed to write key: {key}"))?;
    Ok(())
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        read_value(&self.db_path, key).map_err(|err| StorageError::Read(format!("{err:#}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write_value(&self.db_path, key, value)
            .map_err(|err| StorageError::Write(format!("{err:#}")))
    }
}
