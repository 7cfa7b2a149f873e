use crate::domain::entities::record::RowRecord;
use crate::domain::errors::{ExportError, ImportError};

pub const EXPORT_FILE_NAME: &str = "updated_stores.xlsx";
pub const EXPORT_SHEET_NAME: &str = "Updated Stores";

pub trait SpreadsheetCodec: Send + Sync {
    /// Rows of the first sheet, keyed by the header row.
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RowRecord>, ImportError>;

    /// A single-sheet workbook named [`EXPORT_SHEET_NAME`].
    fn serialize(&self, rows: &[RowRecord]) -> Result<Vec<u8>, ExportError>;
}
