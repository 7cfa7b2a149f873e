use crate::domain::errors::StorageError;

pub const LEDGER_KEY: &str = "updatedStores";

/// Durable string key-value storage that survives restarts.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
