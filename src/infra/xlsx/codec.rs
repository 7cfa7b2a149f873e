use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::domain::entities::record::{CellValue, RowRecord};
use crate::domain::errors::{ExportError, ImportError};
use crate::usecase::ports::codec::{SpreadsheetCodec, EXPORT_SHEET_NAME};

/// Reads with calamine, writes with rust_xlsxwriter.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCodec;

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::Text(v.to_string()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::Text(v.to_string()),
        Data::DateTimeIso(v) => CellValue::Text(v.to_string()),
        Data::DurationIso(v) => CellValue::Text(v.to_string()),
        Data::Error(v) => CellValue::Text(format!("{v:?}")),
        Data::Empty => CellValue::Empty,
    }
}

/// Column order is first appearance across all rows.
pub fn header_columns(rows: &[RowRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for (name, _) in row.cells() {
            if !columns.iter().any(|column| column == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

impl SpreadsheetCodec for XlsxCodec {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<RowRecord>, ImportError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|err| ImportError::Parse(err.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::Parse("workbook has no sheets".to_string()))?
            .map_err(|err| ImportError::Parse(err.to_string()))?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<Option<String>> = header_row
            .iter()
            .map(|cell| {
                let name = cell_to_value(cell).to_string();
                (!name.trim().is_empty()).then_some(name)
            })
            .collect();

        let records = rows
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .filter_map(|(col_idx, header)| {
                        let name = header.as_deref()?;
                        let value = row.get(col_idx).map(cell_to_value).unwrap_or(CellValue::Empty);
                        Some((name, value))
                    })
                    .fold(RowRecord::new(), |mut record, (name, value)| {
                        record.set(name, value);
                        record
                    })
            })
            .filter(|record| !record.is_blank())
            .collect();

        Ok(records)
    }

    fn serialize(&self, rows: &[RowRecord]) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        write_sheet(workbook.add_worksheet(), rows).map_err(to_export_error)?;
        workbook.save_to_buffer().map_err(to_export_error)
    }
}

fn write_sheet(worksheet: &mut Worksheet, rows: &[RowRecord]) -> Result<(), XlsxError> {
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let columns = header_columns(rows);
    for (col_idx, name) in columns.iter().enumerate() {
        worksheet.write_string(0, column_number(col_idx)?, name)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let sheet_row = u32::try_from(row_idx + 1)
            .map_err(|_| XlsxError::ParameterError("too many rows".to_string()))?;
        for (name, value) in row.cells() {
            let Some(col_idx) = columns.iter().position(|column| column == name) else {
                continue;
            };
            let sheet_col = column_number(col_idx)?;
            match value {
                CellValue::Empty => {}
                CellValue::Text(text) => {
                    worksheet.write_string(sheet_row, sheet_col, text)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number(sheet_row, sheet_col, *number)?;
                }
                CellValue::Bool(flag) => {
                    worksheet.write_boolean(sheet_row, sheet_col, *flag)?;
                }
            }
        }
    }
    Ok(())
}

fn column_number(col_idx: usize) -> Result<u16, XlsxError> {
    u16::try_from(col_idx).map_err(|_| XlsxError::ParameterError("too many columns".to_string()))
}

fn to_export_error(err: XlsxError) -> ExportError {
    ExportError::Serialize(err.to_string())
}
