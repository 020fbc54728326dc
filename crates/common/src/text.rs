//! Text cleanup for spreadsheet cells
//!
//! Workbooks authored on one platform and read on another frequently carry
//! UTF-8 punctuation that was decoded as Windows-1252 somewhere along the way
//! (`•` arrives as `â€¢`). [`repair_encoding`] maps those sequences back once at
//! ingestion; [`clean_text`] strips list bullets and surrounding whitespace.

use std::borrow::Cow;

use crate::cell::CellValue;

/// Bullet glyph used in multi-line category cells
pub const BULLET: char = '\u{2022}';

/// UTF-8 punctuation mis-decoded as Windows-1252, paired with the intended text
const MOJIBAKE: &[(&str, &str)] = &[
    ("\u{e2}\u{20ac}\u{a2}", "\u{2022}"),  // bullet
    ("\u{e2}\u{20ac}\u{201c}", "\u{2013}"), // en dash
    ("\u{e2}\u{20ac}\u{201d}", "\u{2014}"), // em dash
    ("\u{e2}\u{20ac}\u{2dc}", "\u{2018}"),  // left single quote
    ("\u{e2}\u{20ac}\u{2122}", "\u{2019}"), // right single quote
    ("\u{e2}\u{20ac}\u{153}", "\u{201c}"),  // left double quote
    ("\u{e2}\u{20ac}\u{9d}", "\u{201d}"),   // right double quote
    ("\u{e2}\u{20ac}\u{a6}", "\u{2026}"),   // ellipsis
];

/// Common prefix of every mis-decoded sequence above
const MOJIBAKE_LEAD: &str = "\u{e2}\u{20ac}";

/// Undo Windows-1252 mojibake for the punctuation found in test sheets
pub fn repair_encoding(text: &str) -> Cow<'_, str> {
    if !text.contains(MOJIBAKE_LEAD) {
        return Cow::Borrowed(text);
    }

    // A repaired character can complete another broken sequence
    // (`â€â€œ` becomes `â€“`), so repeat until nothing changes. Every
    // replacement is shorter than what it replaces, which bounds the loop.
    let mut repaired = text.to_string();
    loop {
        let before = repaired.len();
        for (broken, intended) in MOJIBAKE {
            if repaired.contains(broken) {
                repaired = repaired.replace(broken, intended);
            }
        }
        if repaired.len() == before {
            break;
        }
    }
    Cow::Owned(repaired)
}

/// Strip a leading bullet marker and surrounding whitespace.
///
/// Both the literal bullet and its mis-decoded form are accepted. A run of
/// markers is removed as a whole so that cleaning is idempotent.
pub fn clean_text(text: &str) -> String {
    let repaired = repair_encoding(text);
    let mut rest = repaired.trim();
    while let Some(stripped) = rest.strip_prefix(BULLET) {
        rest = stripped.trim_start();
    }
    rest.trim_end().to_string()
}

/// Clean a cell; blank cells become the empty string
pub fn clean_cell(cell: &CellValue) -> String {
    if cell.is_blank() {
        return String::new();
    }
    clean_text(&cell.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("• Simple sentence", "Simple sentence" ; "literal bullet")]
    #[test_case("â€¢ Simple sentence", "Simple sentence" ; "misdecoded bullet")]
    #[test_case("•\tTabbed", "Tabbed" ; "tab after bullet")]
    #[test_case("•NoSpace", "NoSpace" ; "no whitespace after bullet")]
    #[test_case("  padded  ", "padded" ; "plain trim")]
    #[test_case("", "" ; "empty")]
    #[test_case("Middle • bullet", "Middle • bullet" ; "inner bullet kept")]
    fn test_clean_text(input: &str, expected: &str) {
        assert_eq!(clean_text(input), expected);
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        for input in [
            "• • nested",
            "  • lead",
            "â€¢ x ",
            "plain",
            "•",
            "\r\n• line\r",
            "â€â€œ",
            "â€â€â€œ",
            "â€â€\u{9d} x",
            "â€â€™s",
        ] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_repair_encoding_double_encoded() {
        assert_eq!(repair_encoding("â€â€œ"), "\u{2013}");
        assert_eq!(repair_encoding("â€â€\u{9d}"), "\u{2014}");
        assert_eq!(repair_encoding("â€â€â€œ"), "\u{e2}\u{20ac}\u{2013}");
        assert_eq!(clean_text(" â€¢ â€â€œ x "), "\u{2013} x");
    }

    #[test]
    fn test_repair_encoding_borrows_clean_text() {
        assert!(matches!(repair_encoding("mama gedhara yanavaa"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_repair_encoding_quotes_and_dashes() {
        assert_eq!(
            repair_encoding("â€œhiâ€\u{9d} â€“ itâ€™s"),
            "\u{201c}hi\u{201d} \u{2013} it\u{2019}s"
        );
    }

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell(&CellValue::Empty), "");
        assert_eq!(clean_cell(&CellValue::Number(30.0)), "30");
        assert_eq!(clean_cell(&CellValue::from("• S (≤30 characters)")), "S (≤30 characters)");
    }
}
