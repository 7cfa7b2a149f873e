use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::errors::StorageError;
use crate::usecase::ports::storage::KeyValueStore;

/// Process-lifetime storage, used when the database cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `set` fail, for exercising write errors.
    #[cfg(test)]
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|err| StorageError::Read(err.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let fail = self
            .fail_writes
            .lock()
            .map(|flag| *flag)
            .map_err(|err| StorageError::Write(err.to_string()))?;
        if fail {
            return Err(StorageError::Write("storage is read-only".to_string()));
        }

        let mut values = self
            .values
            .lock()
            .map_err(|err| StorageError::Write(err.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
