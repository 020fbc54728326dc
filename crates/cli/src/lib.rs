//! SwiftTest CLI
//!
//! Command-line interface for normalizing the SwiftTranslator test workbook
//! and running browser scenarios.

pub mod commands;
pub mod output;
