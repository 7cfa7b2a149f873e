use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("could not read spreadsheet: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("failed to open storage: {0}")]
    Open(String),

    #[error("failed to read storage: {0}")]
    Read(String),

    #[error("failed to write storage: {0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerLoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored updates are corrupt: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("address is empty")]
    EmptyQuery,

    #[error("address not found")]
    NotFound,

    #[error("geocoding request failed: {0}")]
    Request(String),

    #[error("unexpected geocoding response: {0}")]
    Response(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("no store is under review")]
    NoRecord,

    #[error("marker has not been moved")]
    NotDirty,

    #[error("already at the last store")]
    Exhausted,

    #[error("invalid coordinates for store: {store_name}")]
    Unresolvable { store_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("no original spreadsheet loaded")]
    EmptyImport,

    #[error("no stores have been updated yet")]
    EmptyLedger,

    #[error("failed to build spreadsheet: {0}")]
    Serialize(String),
}
