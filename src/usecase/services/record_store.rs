use crate::domain::entities::record::{missing_required_columns, RowRecord};
use crate::domain::errors::ImportError;
use crate::usecase::ports::codec::SpreadsheetCodec;

/// The imported rows and the review cursor. Rows are only ever replaced as a
/// whole; corrections live in the edit ledger.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<RowRecord>,
    cursor: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// On any error the current rows and cursor are left untouched.
    pub fn import(
        &mut self,
        codec: &dyn SpreadsheetCodec,
        bytes: &[u8],
    ) -> Result<usize, ImportError> {
        let parsed = codec.parse(bytes)?;
        let missing = missing_required_columns(parsed.first());
        if !missing.is_empty() {
            return Err(ImportError::Schema { missing });
        }

        self.records = parsed;
        self.cursor = 0;
        Ok(self.records.len())
    }

    pub fn records(&self) -> &[RowRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&RowRecord> {
        self.records.get(self.cursor)
    }

    /// True once every imported row has been passed.
    pub fn is_complete(&self) -> bool {
        !self.records.is_empty() && self.cursor >= self.records.len()
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.records.len()
    }

    pub fn advance(&mut self) {
        if self.cursor < self.records.len() {
            self.cursor += 1;
        }
    }
}
