//! Update Command: regenerate the JSON snapshot from the workbook

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use swifttest_common::{load_suite, HarnessConfig};

use super::SourceArgs;
use crate::output::{print_success, print_warning};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Snapshot file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: UpdateArgs, mut config: HarnessConfig) -> Result<()> {
    args.source.apply(&mut config);
    if let Some(output) = args.output {
        config.snapshot.path = output;
    }

    let (suite, report) = load_suite(&config)?;

    if report.rows_without_id > 0 {
        info!("Skipped {} row(s) without an id", report.rows_without_id);
    }
    if !report.unclassified.is_empty() {
        print_warning(&format!(
            "{} row(s) with unrecognised id prefix: {}",
            report.unclassified.len(),
            report.unclassified.join(", ")
        ));
    }

    suite.write_snapshot(&config.snapshot.path)?;

    print_success(&format!(
        "Parsed {} positive, {} negative, {} UI tests into {}",
        suite.positive_tests.len(),
        suite.negative_tests.len(),
        suite.ui_tests.len(),
        config.snapshot.path.display()
    ));
    Ok(())
}
