//! Row normalization: classification, category parsing and field extraction
//!
//! This is the single place that turns raw spreadsheet rows into
//! [`TestCase`]s. Both the snapshot writer and the scenario planner go
//! through [`normalize_rows`].

use serde::Serialize;
use tracing::{debug, info};

use crate::cell::{cell_at, RawRow};
use crate::config::{CategoryLayout, SheetConfig};
use crate::text::{clean_cell, clean_text};
use crate::types::{Bucket, Category, TestCase, TestSuite};

/// Identifier prefixes, checked in order; first match wins
pub const PREFIXES: &[(&str, Bucket)] = &[
    ("Pos_Fun_", Bucket::Positive),
    ("Neg_Fun_", Bucket::Negative),
    ("Pos_UI_", Bucket::Ui),
    ("Neg_UI_", Bucket::Ui),
];

/// Bucket for an identifier, or `None` if no prefix matches
pub fn classify(id: &str) -> Option<Bucket> {
    PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, bucket)| *bucket)
}

/// Decode the multi-line category cell.
///
/// Lines are cleaned and blank lines dropped before indexing. An index past
/// the last line yields an empty field; nothing is shifted to fill the gap.
pub fn parse_category(raw: &str, layout: &CategoryLayout) -> Category {
    let lines: Vec<String> = raw
        .split('\n')
        .map(clean_text)
        .filter(|l| !l.is_empty())
        .collect();

    let line = |i: usize| lines.get(i).cloned().unwrap_or_default();

    Category {
        input_type: line(layout.input_type),
        sentence_focus: line(layout.sentence_focus),
        quality_focus: line(layout.quality_focus),
    }
}

/// Normalize a single row.
///
/// Returns `None` for rows without a text identifier and for identifiers with
/// an unknown prefix.
pub fn normalize_row(row: &RawRow, sheet: &SheetConfig) -> Option<(Bucket, TestCase)> {
    let id = row_id(row, sheet)?;
    let bucket = classify(&id)?;
    let columns = &sheet.columns;

    let name = clean_cell(cell_at(row, columns.name));
    let expected_output = clean_cell(cell_at(row, columns.expected_output));
    let category = parse_category(
        &cell_at(row, columns.category).to_text(),
        sheet.category_layout(bucket),
    );

    let mut case = TestCase {
        id,
        name,
        length_type: clean_cell(cell_at(row, columns.length_type)),
        input: clean_cell(cell_at(row, columns.input)),
        expected_output,
        category,
        expected_issue: None,
        description: None,
    };

    match bucket {
        Bucket::Positive => {}
        Bucket::Negative => case.expected_issue = Some(case.expected_output.clone()),
        Bucket::Ui => case.description = Some(case.name.clone()),
    }

    Some((bucket, case))
}

/// Cleaned identifier, if the id cell holds non-empty text
fn row_id(row: &RawRow, sheet: &SheetConfig) -> Option<String> {
    let id = clean_text(cell_at(row, sheet.columns.id).as_text()?);
    (!id.is_empty()).then_some(id)
}

/// Counts gathered while normalizing a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    /// Data rows examined (header rows excluded)
    pub rows_scanned: usize,

    /// Rows dropped for a missing or non-text identifier
    pub rows_without_id: usize,

    /// Identifiers that matched no known prefix
    pub unclassified: Vec<String>,
}

/// Normalize every data row of a sheet into buckets
pub fn normalize_rows(rows: &[RawRow], sheet: &SheetConfig) -> (TestSuite, NormalizationReport) {
    let mut suite = TestSuite::default();
    let mut report = NormalizationReport::default();

    for (index, row) in rows.iter().enumerate().skip(sheet.header_rows) {
        report.rows_scanned += 1;

        let Some(id) = row_id(row, sheet) else {
            report.rows_without_id += 1;
            continue;
        };

        match normalize_row(row, sheet) {
            Some((bucket, case)) => suite.push(bucket, case),
            None => {
                debug!("Row {} has unrecognised id '{}', skipping", index + 1, id);
                report.unclassified.push(id);
            }
        }
    }

    info!(
        "Parsed {} positive, {} negative, {} UI tests.",
        suite.positive_tests.len(),
        suite.negative_tests.len(),
        suite.ui_tests.len()
    );

    (suite, report)
}
