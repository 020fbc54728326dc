//! SwiftTest Common Library
//!
//! Spreadsheet reading and normalization shared by the snapshot writer and
//! the browser scenario runner.

pub mod cell;
pub mod config;
pub mod error;
pub mod normalize;
pub mod snapshot;
pub mod text;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use cell::{CellValue, RawRow};
pub use config::{CategoryLayout, ColumnLayout, HarnessConfig, SheetConfig};
pub use error::{Error, Result};
pub use normalize::{classify, normalize_row, normalize_rows, parse_category, NormalizationReport};
pub use text::{clean_cell, clean_text, repair_encoding};
pub use types::*;
pub use workbook::{load_suite, Workbook};

/// SwiftTest version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "swifttest.toml";
