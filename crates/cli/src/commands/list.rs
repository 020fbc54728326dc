//! List Command: print normalized test cases

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use swifttest_common::{load_suite, Bucket, HarnessConfig, TestCase, TestSuite};

use super::SourceArgs;
use crate::output::{print_list, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only list this bucket (positive, negative, ui)
    #[arg(short, long)]
    pub bucket: Option<Bucket>,

    /// Read the JSON snapshot instead of the workbook
    #[arg(long)]
    pub from_snapshot: bool,
}

/// Test case display wrapper for serialization
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDisplay {
    pub bucket: Bucket,
    #[serde(flatten)]
    pub case: TestCase,
}

impl TableDisplay for CaseDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Bucket", "ID", "Name", "Length", "Input", "Input Type", "Quality Focus"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.bucket.to_string(),
            self.case.id.clone(),
            self.case.name.clone(),
            self.case.length_type.clone(),
            self.case.input.clone(),
            self.case.category.input_type.clone(),
            self.case.category.quality_focus.clone(),
        ]
    }
}

/// Flatten a suite into display rows, optionally restricted to one bucket
pub fn displays(suite: &TestSuite, bucket: Option<Bucket>) -> Vec<CaseDisplay> {
    suite
        .iter()
        .filter(|(b, _)| bucket.map_or(true, |wanted| wanted == *b))
        .map(|(bucket, case)| CaseDisplay {
            bucket,
            case: case.clone(),
        })
        .collect()
}

pub fn execute(args: ListArgs, mut config: HarnessConfig, format: OutputFormat) -> Result<()> {
    args.source.apply(&mut config);

    let suite = if args.from_snapshot {
        TestSuite::read_snapshot(&config.snapshot.path)?
    } else {
        load_suite(&config)?.0
    };

    print_list(&displays(&suite, args.bucket), format);
    Ok(())
}
