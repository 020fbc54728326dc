//! Scenario runner: executes planned scenarios and collects verdicts

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use swifttest_common::{Bucket, HarnessConfig, TestSuite};

use crate::error::{E2eError, E2eResult};
use crate::playwright::BrowserDriver;
use crate::scenario::{plan_suite, Scenario, ScenarioFilter};
use crate::verdict::{verdict, Observation, ScriptRange};

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub ordinal: usize,
    pub id: String,
    pub name: String,
    pub bucket: Bucket,
    pub success: bool,
    pub duration_ms: u64,
    pub screenshot_path: Option<PathBuf>,
    pub screenshot_sha256: Option<String>,
    pub observations: Vec<ObservationSummary>,
    pub error: Option<String>,
}

/// Observation without the page body, for reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSummary {
    pub label: String,
    pub input_visible: bool,
    pub settled: bool,
    pub elapsed_ms: u64,
    pub content_bytes: usize,
}

impl From<&Observation> for ObservationSummary {
    fn from(obs: &Observation) -> Self {
        Self {
            label: obs.label.clone(),
            input_visible: obs.input_visible,
            settled: obs.settled,
            elapsed_ms: obs.elapsed_ms,
            content_bytes: obs.content.len(),
        }
    }
}

/// Result of running a set of scenarios, ordered by ordinal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Scenarios in flight at once
    pub workers: usize,

    /// Deadline for one scenario
    pub scenario_timeout: Duration,

    /// Output directory for results
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            scenario_timeout: Duration::from_secs(120),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

impl RunnerConfig {
    pub fn from_harness(config: &HarnessConfig) -> Self {
        Self {
            workers: config.runner.workers,
            scenario_timeout: Duration::from_secs(config.runner.scenario_timeout_secs),
            output_dir: config.runner.output_dir.clone(),
        }
    }
}

/// Runs scenarios through a [`BrowserDriver`]
pub struct ScenarioRunner<D> {
    driver: D,
    harness: HarnessConfig,
    config: RunnerConfig,
    script: ScriptRange,
}

impl<D: BrowserDriver> ScenarioRunner<D> {
    pub fn new(driver: D, harness: HarnessConfig) -> E2eResult<Self> {
        let config = RunnerConfig::from_harness(&harness);
        Self::with_config(driver, harness, config)
    }

    pub fn with_config(driver: D, harness: HarnessConfig, config: RunnerConfig) -> E2eResult<Self> {
        let script = ScriptRange::from_target(&harness.target)?;
        Ok(Self {
            driver,
            harness,
            config,
            script,
        })
    }

    /// Plan and run the matching scenarios of a suite
    pub async fn run_suite(&self, suite: &TestSuite, filter: &ScenarioFilter) -> E2eResult<SuiteResult> {
        let scenarios = plan_suite(suite, &self.harness, filter);
        if scenarios.is_empty() {
            return Err(E2eError::NoScenarios(format!("{:?}", filter)));
        }
        Ok(self.run_scenarios(scenarios).await)
    }

    /// Run every scenario in one bucket
    pub async fn run_bucket(&self, suite: &TestSuite, bucket: Bucket) -> E2eResult<SuiteResult> {
        let filter = ScenarioFilter {
            bucket: Some(bucket),
            id: None,
        };
        self.run_suite(suite, &filter).await
    }

    /// Run planned scenarios with bounded concurrency.
    ///
    /// A failing or hung scenario only fails itself. Results come back in
    /// ordinal order whatever order they finished in.
    pub async fn run_scenarios(&self, scenarios: Vec<Scenario>) -> SuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();
        let workers = self.config.workers.max(1);

        info!("Running {} scenario(s) with {} worker(s)...", scenarios.len(), workers);

        let mut results: Vec<ScenarioResult> = stream::iter(scenarios.iter())
            .map(|scenario| self.run_scenario(scenario))
            .buffer_unordered(workers)
            .collect()
            .await;
        results.sort_by_key(|r| r.ordinal);

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!("Scenario Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        SuiteResult {
            total: results.len(),
            passed,
            failed,
            duration_ms,
            started_at,
            results,
        }
    }

    /// Run a single scenario inside its own failure boundary
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let start = Instant::now();
        let case = &scenario.case;

        info!("--- [{}] {} Test Case: {} ---", scenario.ordinal, scenario.bucket, case.id);
        debug!("Input: {}", case.input);
        match scenario.bucket {
            Bucket::Negative => debug!("Expected Issue: {}", case.expected_output),
            _ => debug!("Expected: {}", case.expected_output),
        }

        let outcome = tokio::time::timeout(self.config.scenario_timeout, self.driver.execute(scenario)).await;

        let (report, failure) = match outcome {
            Err(_) => (
                None,
                Some(
                    E2eError::Timeout(format!(
                        "scenario {} after {} s",
                        case.id,
                        self.config.scenario_timeout.as_secs()
                    ))
                    .to_string(),
                ),
            ),
            Ok(Err(e)) => (None, Some(e.to_string())),
            Ok(Ok(report)) => {
                let failure = match &report.error {
                    Some(message) => Some(format!("Step failed: {}", message)),
                    None => verdict(&scenario.expectation, &report.observations, &self.script, &case.input)
                        .err()
                        .map(|reason| E2eError::AssertionFailed(reason).to_string()),
                };
                (Some(report), failure)
            }
        };

        let screenshot_path = report
            .as_ref()
            .and_then(|r| r.screenshot.clone())
            .filter(|p| p.exists());
        let screenshot_sha256 = screenshot_path.as_deref().and_then(|p| match hash_file(p) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!("Could not hash screenshot {}: {}", p.display(), e);
                None
            }
        });

        let duration_ms = start.elapsed().as_millis() as u64;
        let success = failure.is_none();
        if success {
            info!("✓ {} ({} ms)", scenario.title(), duration_ms);
        } else {
            error!("✗ {} - {}", scenario.title(), failure.as_deref().unwrap_or("unknown error"));
        }

        ScenarioResult {
            ordinal: scenario.ordinal,
            id: case.id.clone(),
            name: case.name.clone(),
            bucket: scenario.bucket,
            success,
            duration_ms,
            screenshot_path,
            screenshot_sha256,
            observations: report
                .map(|r| r.observations.iter().map(ObservationSummary::from).collect())
                .unwrap_or_default(),
            error: failure,
        }
    }

    /// Write suite results to JSON file
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("scenario-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Hash a file using SHA256
fn hash_file(path: &Path) -> std::io::Result<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_config_from_harness() {
        let mut harness = HarnessConfig::default();
        harness.runner.workers = 3;
        harness.runner.scenario_timeout_secs = 30;

        let config = RunnerConfig::from_harness(&harness);
        assert_eq!(config.workers, 3);
        assert_eq!(config.scenario_timeout, Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("test-results"));
    }

    #[test]
    fn test_hash_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(
            hash_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
