use std::fmt;

use crate::domain::entities::geo::LatLng;

pub const STORE_NAME: &str = "StoreName";
pub const PROVINCE: &str = "Province";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

pub const REQUIRED_COLUMNS: [&str; 4] = [STORE_NAME, PROVINCE, LATITUDE, LONGITUDE];

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }

    /// Numeric cells are taken as-is, text is trimmed and parsed.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(value) => *value,
            CellValue::Text(text) => text.trim().parse::<f64>().ok()?,
            CellValue::Empty | CellValue::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One imported spreadsheet row, column name to cell, in sheet column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowRecord {
    cells: Vec<(String, CellValue)>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.set(column, value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// A blank cell counts as absent.
    pub fn has_value(&self, column: &str) -> bool {
        self.get(column).is_some_and(|value| !value.is_empty())
    }

    /// Replaces the cell in place, or appends a new column at the end.
    pub fn set(&mut self, column: &str, value: CellValue) {
        match self.cells.iter_mut().find(|(name, _)| name == column) {
            Some((_, cell)) => *cell = value,
            None => self.cells.push((column.to_string(), value)),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_empty())
    }

    pub fn store_name(&self) -> String {
        self.text(STORE_NAME)
    }

    pub fn province(&self) -> String {
        self.text(PROVINCE)
    }

    fn text(&self, column: &str) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }

    /// The stored position, or `None` when either coordinate is unusable.
    pub fn coordinates(&self) -> Option<LatLng> {
        let lat = self.get(LATITUDE)?.as_f64()?;
        let lng = self.get(LONGITUDE)?.as_f64()?;
        LatLng::checked(lat, lng)
    }

    /// Raw coordinate cells as written in the sheet, for display.
    pub fn raw_coordinates(&self) -> (String, String) {
        (self.text(LATITUDE), self.text(LONGITUDE))
    }
}

pub fn missing_required_columns(first: Option<&RowRecord>) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|column| !first.is_some_and(|record| record.has_value(column)))
        .map(|column| column.to_string())
        .collect()
}
