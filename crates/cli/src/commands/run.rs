//! Run Command: execute browser scenarios against the application

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use swifttest_common::{load_suite, Bucket, HarnessConfig};
use swifttest_e2e::{PlaywrightConfig, PlaywrightHandle, ScenarioFilter, ScenarioResult, ScenarioRunner};

use super::SourceArgs;
use crate::output::{print_error, print_list, print_success, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only run this bucket (positive, negative, ui)
    #[arg(short, long)]
    pub bucket: Option<Bucket>,

    /// Only run the case with this id
    #[arg(long)]
    pub id: Option<String>,

    /// Scenarios to run at once
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Override the application base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

/// Scenario result display wrapper for serialization
#[derive(Serialize)]
pub struct ResultDisplay<'a>(&'a ScenarioResult);

impl TableDisplay for ResultDisplay<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["#", "ID", "Bucket", "Result", "Duration", "Error"]
    }

    fn row(&self) -> Vec<String> {
        let r = self.0;
        vec![
            r.ordinal.to_string(),
            r.id.clone(),
            r.bucket.to_string(),
            if r.success { "pass" } else { "FAIL" }.to_string(),
            format!("{} ms", r.duration_ms),
            r.error.clone().unwrap_or_default(),
        ]
    }
}

/// Returns whether every scenario passed
pub async fn execute(args: RunArgs, mut config: HarnessConfig, format: OutputFormat) -> Result<bool> {
    args.source.apply(&mut config);
    if let Some(workers) = args.workers {
        config.runner.workers = workers;
    }
    if let Some(base_url) = args.base_url {
        config.target.base_url = base_url;
    }
    if args.headed {
        config.browser.headless = false;
    }

    let (suite, _) = load_suite(&config)?;

    let driver = PlaywrightHandle::new(PlaywrightConfig::from_harness(&config)?)?;
    let runner = ScenarioRunner::new(driver, config)?;

    let filter = ScenarioFilter {
        bucket: args.bucket,
        id: args.id,
    };
    let results = runner.run_suite(&suite, &filter).await?;
    runner.write_results(&results)?;

    let rows: Vec<ResultDisplay> = results.results.iter().map(ResultDisplay).collect();
    print_list(&rows, format);

    if results.success() {
        print_success(&format!("{} scenario(s) passed", results.passed));
    } else {
        print_error(&format!("{} of {} scenario(s) failed", results.failed, results.total));
    }
    Ok(results.success())
}
