//! Spreadsheet cell model

use calamine::Data;
use serde::{Deserialize, Serialize};

use crate::text::repair_encoding;

/// A single untyped spreadsheet cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// One spreadsheet row, indexed by absolute column
pub type RawRow = Vec<CellValue>;

impl CellValue {
    /// Text content, only for text cells
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this cell counts as absent (empty cell, empty string, zero, false)
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
            CellValue::Bool(b) => !b,
        }
    }

    /// Render the cell as a string; numbers use their shortest decimal form
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(repair_encoding(s).into_owned()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(_) => CellValue::Empty,
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Fetch a cell by column, treating short rows as empty
pub fn cell_at(row: &[CellValue], column: usize) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    row.get(column).unwrap_or(&EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_without_trailing_zero() {
        assert_eq!(CellValue::Number(12.0).to_text(), "12");
        assert_eq!(CellValue::Number(1.5).to_text(), "1.5");
    }

    #[test]
    fn test_blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(CellValue::Number(0.0).is_blank());
        assert!(!CellValue::from("Pos_Fun_0001").is_blank());
    }

    #[test]
    fn test_cell_at_past_end_is_empty() {
        let row: RawRow = vec!["a".into()];
        assert_eq!(cell_at(&row, 8), &CellValue::Empty);
    }

    #[test]
    fn test_from_calamine_repairs_mojibake() {
        let cell = CellValue::from(&Data::String("â€¢ Simple sentence".to_string()));
        assert_eq!(cell, CellValue::Text("• Simple sentence".to_string()));
    }
}
