//! Inspect Command: show a sheet's header row and first data row

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use swifttest_common::{clean_cell, CellValue, HarnessConfig, Workbook};

use super::SourceArgs;
use crate::output::{print_info, print_list, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// One column of the inspected sheet
#[derive(Debug, Serialize, PartialEq)]
pub struct ColumnDisplay {
    pub index: usize,
    pub header: String,
    pub first_row: String,
}

impl TableDisplay for ColumnDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["#", "Header", "First Row"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.index.to_string(), self.header.clone(), self.first_row.clone()]
    }
}

/// Pair header cells with the first data row, column by column
pub fn columns(header: &[CellValue], first: &[CellValue]) -> Vec<ColumnDisplay> {
    let width = header.len().max(first.len());
    (0..width)
        .map(|index| ColumnDisplay {
            index,
            header: header.get(index).map(clean_cell).unwrap_or_default(),
            first_row: first.get(index).map(CellValue::to_text).unwrap_or_default(),
        })
        .collect()
}

pub fn execute(args: InspectArgs, config: HarnessConfig, format: OutputFormat) -> Result<()> {
    let path = args.source.workbook.unwrap_or(config.workbook.path);
    let mut workbook = Workbook::open(&path)?;

    let sheet = match args.source.sheet {
        Some(sheet) => sheet,
        None => workbook.first_sheet()?,
    };
    print_info(&format!(
        "Sheets: {} (inspecting '{}')",
        workbook.sheet_names().join(", "),
        sheet
    ));

    let rows = workbook.rows(&sheet)?;
    let header = rows.first().map(Vec::as_slice).unwrap_or_default();
    let first = rows.get(1).map(Vec::as_slice).unwrap_or_default();

    print_list(&columns(header, first), format);
    Ok(())
}
