//! CLI Commands

pub mod inspect;
pub mod list;
pub mod run;
pub mod update;

use std::path::PathBuf;

use swifttest_common::HarnessConfig;

/// Workbook location overrides shared by several commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the test case workbook
    #[arg(long)]
    pub workbook: Option<PathBuf>,

    /// Sheet holding the test cases
    #[arg(long)]
    pub sheet: Option<String>,
}

impl SourceArgs {
    /// Apply overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(path) = &self.workbook {
            config.workbook.path = path.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet.name = sheet.clone();
        }
    }
}
