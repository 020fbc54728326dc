//! Workbook reading backed by calamine

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cell::{CellValue, RawRow};
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::normalize::{normalize_rows, NormalizationReport};
use crate::types::TestSuite;

/// An open spreadsheet workbook (xlsx, xls, ods)
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook, detecting the format from its extension
    pub fn open(path: &Path) -> Result<Self> {
        info!("Reading workbook: {}", path.display());
        let sheets = open_workbook_auto(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// Name of the first sheet
    pub fn first_sheet(&self) -> Result<String> {
        self.sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyWorkbook(self.path.display().to_string()))
    }

    /// All rows of a sheet, with column indexes measured from column A
    pub fn rows(&mut self, sheet: &str) -> Result<Vec<RawRow>> {
        let available = self.sheet_names();
        if !available.iter().any(|name| name == sheet) {
            return Err(Error::SheetNotFound {
                sheet: sheet.to_string(),
                available,
            });
        }

        let range = self.sheets.worksheet_range(sheet)?;
        let rows = rows_from_range(&range);
        debug!("Sheet '{}' has {} row(s)", sheet, rows.len());
        Ok(rows)
    }
}

/// Convert a calamine range into absolute rows.
///
/// calamine trims leading empty rows and columns from a range; they are
/// restored here so the positional column contract still holds.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<RawRow> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row: RawRow = vec![CellValue::Empty; start_col as usize];
        row.extend(cells.iter().map(CellValue::from));
        rows.push(row);
    }
    rows
}

/// Read the configured sheet and normalize it
pub fn load_suite(config: &HarnessConfig) -> Result<(TestSuite, NormalizationReport)> {
    let mut workbook = Workbook::open(&config.workbook.path)?;
    let rows = workbook.rows(&config.sheet.name)?;
    Ok(normalize_rows(&rows, &config.sheet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_range_keeps_absolute_columns() {
        let mut range: Range<Data> = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("TC ID".to_string()));
        range.set_value((2, 1), Data::String("Pos_Fun_0001".to_string()));
        range.set_value((2, 2), Data::Float(3.0));

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1][0], CellValue::Empty);
        assert_eq!(rows[1][1], CellValue::Text("TC ID".to_string()));
        assert_eq!(rows[2][1], CellValue::Text("Pos_Fun_0001".to_string()));
        assert_eq!(rows[2][2], CellValue::Number(3.0));
    }

    #[test]
    fn test_empty_range_has_no_rows() {
        let range: Range<Data> = Range::empty();
        assert!(rows_from_range(&range).is_empty());
    }

    #[test]
    fn test_open_missing_workbook_fails() {
        assert!(Workbook::open(Path::new("missing/IT23763180_Test_Case.xlsx")).is_err());
    }
}
