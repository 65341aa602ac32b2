// src/importer/cell.rs

use serde::Serialize;
use std::fmt;

/// A single decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Empty cells and whitespace-only text carry no value for any field.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }

    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Numeric view of the cell; text goes through the lenient amount parser.
    pub fn as_amount(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => crate::domain::parse_amount(s),
            CellValue::Empty => 0.0,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // Whole numbers print without a trailing ".0" (phone numbers, prices).
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One data row as produced by the decoder: header → cell, in column order.
///
/// Headers are unique. Inserting a header that already exists replaces the earlier
/// column, so with duplicate headers the rightmost column wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
    sheet_row: Option<usize>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags the row with its 1-based row number in the source sheet.
    pub fn at_sheet_row(mut self, sheet_row: usize) -> Self {
        self.sheet_row = Some(sheet_row);
        self
    }

    /// Row number in the source sheet, when the decoder recorded one.
    pub fn sheet_row(&self) -> Option<usize> {
        self.sheet_row
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        let header = header.into();
        self.cells.retain(|(h, _)| *h != header);
        self.cells.push((header, value.into()));
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank (trailing junk rows in hand-kept sheets).
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }
}

impl<H, V> FromIterator<(H, V)> for RawRow
where
    H: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_header_keeps_rightmost_column() {
        let row: RawRow = [("Name", "Left"), ("Phone", "1"), ("Name", "Right")]
            .into_iter()
            .collect();

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Name"), Some(&CellValue::Text("Right".into())));
        let headers: Vec<&str> = row.iter().map(|(h, _)| h).collect();
        assert_eq!(headers, vec!["Phone", "Name"]);
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(5551234.0).to_string(), "5551234");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
    }

    #[test]
    fn blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".into()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }
}
