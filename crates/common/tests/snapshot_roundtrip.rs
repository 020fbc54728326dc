//! Snapshot round-trip tests
//!
//! Normalizes a fixed set of sheet rows, writes the JSON snapshot and reads it
//! back.

use std::fs;

use swifttest_common::{normalize_rows, CellValue, RawRow, SheetConfig, TestSuite};
use tempfile::TempDir;

fn sheet_row(cells: &[(usize, CellValue)]) -> RawRow {
    let mut row: RawRow = vec![CellValue::Empty; 9];
    for (column, value) in cells {
        row[*column] = value.clone();
    }
    row
}

fn sample_rows() -> Vec<RawRow> {
    vec![
        sheet_row(&[
            (0, "TC ID".into()),
            (1, "Test case name".into()),
            (2, "Input length type".into()),
            (3, "Input".into()),
            (4, "Expected output".into()),
            (8, "Accuracy justification/ Description of the issue type".into()),
        ]),
        sheet_row(&[
            (0, "Pos_Fun_0001".into()),
            (1, "Convert a simple greeting".into()),
            (2, "S".into()),
            (3, "oyaata kohomadha?".into()),
            (4, "ඔයාට කොහොමද?".into()),
            (
                8,
                "• Greeting / request / response\n• Simple sentence\n• S (≤30 characters)\n• Accuracy validation".into(),
            ),
        ]),
        sheet_row(&[
            (0, "Pos_Fun_0002".into()),
            (1, "Numbers in sentence".into()),
            (2, "M".into()),
            (3, CellValue::Number(2024.0)),
            (4, "2024".into()),
            (8, "â€¢ Mixed content\nâ€¢ Compound sentence\nâ€¢ M (31-299 characters)".into()),
        ]),
        sheet_row(&[
            (0, "Neg_Fun_0001".into()),
            (1, "Joined words".into()),
            (2, "S".into()),
            (3, "mamagedharayanavaa".into()),
            (4, "Words are not separated".into()),
            (8, "• Typographical error handling\n• Simple sentence\n• S (≤30 characters)\n• Robustness validation".into()),
        ]),
        sheet_row(&[(0, CellValue::Empty), (1, "Trailing notes".into())]),
        sheet_row(&[
            (0, "Pos_UI_0001".into()),
            (1, "Real-time output update".into()),
            (2, "S".into()),
            (3, "api gedhara".into()),
            (4, "අපි ගෙදර".into()),
            (8, "• Usability flow\n• Simple sentence\n• S (≤30 characters)\n• Real-time output update behavior".into()),
        ]),
    ]
}

#[test]
fn snapshot_round_trip_preserves_buckets_and_fields() {
    let (suite, report) = normalize_rows(&sample_rows(), &SheetConfig::default());
    assert_eq!(report.rows_scanned, 5);
    assert_eq!(report.rows_without_id, 1);

    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("test-data/test-cases.json");
    suite.write_snapshot(&path).expect("write snapshot");

    let restored = TestSuite::read_snapshot(&path).expect("read snapshot");
    assert_eq!(restored.positive_tests.len(), 2);
    assert_eq!(restored.negative_tests.len(), 1);
    assert_eq!(restored.ui_tests.len(), 1);
    assert_eq!(restored, suite);
}

#[test]
fn snapshot_uses_camel_case_shape() {
    let (suite, _) = normalize_rows(&sample_rows(), &SheetConfig::default());

    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("test-cases.json");
    suite.write_snapshot(&path).expect("write snapshot");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    let first = &json["positiveTests"][0];
    assert_eq!(first["id"], "Pos_Fun_0001");
    assert_eq!(first["lengthType"], "S");
    assert_eq!(first["expectedOutput"], "ඔයාට කොහොමද?");
    assert_eq!(first["category"]["inputType"], "Greeting / request / response");
    assert_eq!(first["category"]["sentenceFocus"], "Simple sentence");
    assert_eq!(first["category"]["qualityFocus"], "Accuracy validation");
    assert!(first.get("expectedIssue").is_none());

    let second = &json["positiveTests"][1];
    assert_eq!(second["input"], "2024");
    assert_eq!(second["category"]["inputType"], "Mixed content");
    assert_eq!(second["category"]["qualityFocus"], "");

    let negative = &json["negativeTests"][0];
    assert_eq!(negative["expectedIssue"], negative["expectedOutput"]);

    let ui = &json["uiTests"][0];
    assert_eq!(ui["description"], ui["name"]);
}

#[test]
fn snapshot_overwrites_previous_contents() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("test-cases.json");
    fs::write(&path, "{\"positiveTests\": [{\"stale\": true}], \"extra\": 1}").unwrap();

    TestSuite::default().write_snapshot(&path).expect("write snapshot");

    let restored = TestSuite::read_snapshot(&path).expect("read snapshot");
    assert!(restored.is_empty());
    assert!(!fs::read_to_string(&path).unwrap().contains("stale"));
}
