//! SwiftTest E2E Scenario Runner
//!
//! Turns normalized test cases into browser scenarios and runs them through
//! Playwright:
//! - Plans one scenario per case (navigate, locate input, fill or type, settle, screenshot)
//! - Generates a standalone Playwright script per scenario and runs it with node
//! - Evaluates verdicts in Rust from the observations the script reports
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Scenario Runner (Rust)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── plan_suite(suite, filter) -> [Scenario]              │
//! │    ├── driver.execute(scenario) -> ScriptReport             │
//! │    ├── verdict(expectation, observations) -> pass/fail      │
//! │    └── write_results(SuiteResult)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario                                                   │
//! │    ├── ordinal, bucket, case                                │
//! │    ├── steps: [ScenarioStep]                                │
//! │    │     ├── navigate { url }                               │
//! │    │     ├── wait_visible { selector, timeout_ms }          │
//! │    │     ├── clear / fill / type                            │
//! │    │     ├── settle { label }                               │
//! │    │     └── screenshot { path }                            │
//! │    └── expectation: script_present | input_visible          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod playwright;
pub mod runner;
pub mod scenario;
pub mod verdict;

pub use error::{E2eError, E2eResult};
pub use playwright::{BrowserDriver, PlaywrightConfig, PlaywrightHandle, ScriptReport};
pub use runner::{RunnerConfig, ScenarioResult, ScenarioRunner, SuiteResult};
pub use scenario::{plan_suite, Expectation, Scenario, ScenarioFilter, ScenarioStep};
pub use verdict::{Observation, ScriptRange};
