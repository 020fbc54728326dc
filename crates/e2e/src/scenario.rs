//! Scenario planning: one browser scenario per normalized test case

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use swifttest_common::{Bucket, HarnessConfig, TestCase, TestSuite};

/// Observation label for scenarios that fill the input in one go
pub const AFTER_FILL: &str = "after_fill";

/// A planned scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// 1-based position in the full suite, stable under filtering
    pub ordinal: usize,

    pub bucket: Bucket,

    pub case: TestCase,

    /// Steps to execute in order
    pub steps: Vec<ScenarioStep>,

    /// Check applied to the reported observations
    pub expectation: Expectation,

    /// Where the screenshot lands, whether or not the steps succeed
    pub screenshot_path: PathBuf,
}

/// A single browser interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Load a page and wait for network activity to stop
    Navigate { url: String },

    /// Wait for an element to become visible
    WaitVisible { selector: String, timeout_ms: u64 },

    /// Clear an input
    Clear { selector: String },

    /// Replace an input's value
    Fill { selector: String, value: String },

    /// Type text with keyboard simulation
    Type {
        selector: String,
        text: String,
        delay_ms: u64,
    },

    /// Poll page content until it settles, then record an observation
    Settle { label: String, selector: String },

    /// Viewport screenshot
    Screenshot { path: PathBuf },
}

/// What must hold for a scenario to pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// Page content at the labelled observation contains output-script text
    ScriptPresent { observation: String },

    /// The input control is still visible at the labelled observation
    InputVisible { observation: String },
}

impl Scenario {
    /// Plan the scenario for one case
    pub fn plan(ordinal: usize, bucket: Bucket, case: &TestCase, config: &HarnessConfig) -> Self {
        let selector = config.target.input_selector();
        let screenshot_path = config
            .browser
            .screenshot_dir
            .join(format!("{}.png", case.id));

        let mut steps = vec![
            ScenarioStep::Navigate {
                url: format!("{}/", config.target.base_url.trim_end_matches('/')),
            },
            ScenarioStep::WaitVisible {
                selector: selector.clone(),
                timeout_ms: config.browser.visibility_timeout_ms,
            },
            ScenarioStep::Clear {
                selector: selector.clone(),
            },
        ];

        let expectation = match bucket {
            Bucket::Positive | Bucket::Negative => {
                steps.push(ScenarioStep::Fill {
                    selector: selector.clone(),
                    value: case.input.clone(),
                });
                steps.push(ScenarioStep::Settle {
                    label: AFTER_FILL.to_string(),
                    selector,
                });

                let observation = AFTER_FILL.to_string();
                if bucket == Bucket::Positive {
                    Expectation::ScriptPresent { observation }
                } else {
                    Expectation::InputVisible { observation }
                }
            }
            Bucket::Ui => {
                let mut last_label = AFTER_FILL.to_string();
                for (i, burst) in config.browser.ui_bursts.iter().enumerate() {
                    last_label = format!("burst_{}", i + 1);
                    steps.push(ScenarioStep::Type {
                        selector: selector.clone(),
                        text: burst.clone(),
                        delay_ms: config.browser.typing_delay_ms,
                    });
                    steps.push(ScenarioStep::Settle {
                        label: last_label.clone(),
                        selector: selector.clone(),
                    });
                }
                Expectation::ScriptPresent {
                    observation: last_label,
                }
            }
        };

        steps.push(ScenarioStep::Screenshot {
            path: screenshot_path.clone(),
        });

        Self {
            ordinal,
            bucket,
            case: case.clone(),
            steps,
            expectation,
            screenshot_path,
        }
    }

    /// Display name, as used in logs and reports
    pub fn title(&self) -> String {
        format!("{}: {}", self.case.id, self.case.name)
    }
}

/// Which scenarios to run
#[derive(Debug, Clone, Default)]
pub struct ScenarioFilter {
    pub bucket: Option<Bucket>,
    pub id: Option<String>,
}

impl ScenarioFilter {
    fn matches(&self, bucket: Bucket, case: &TestCase) -> bool {
        self.bucket.map_or(true, |b| b == bucket)
            && self.id.as_deref().map_or(true, |id| case.id == id)
    }
}

/// Plan every matching case in the suite.
///
/// Ordinals are assigned over the whole suite before filtering.
pub fn plan_suite(suite: &TestSuite, config: &HarnessConfig, filter: &ScenarioFilter) -> Vec<Scenario> {
    suite
        .iter()
        .enumerate()
        .filter(|(_, (bucket, case))| filter.matches(*bucket, case))
        .map(|(i, (bucket, case))| Scenario::plan(i + 1, bucket, case, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, input: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            name: "name".to_string(),
            input: input.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_positive_plan() {
        let config = HarnessConfig::default();
        let scenario = Scenario::plan(1, Bucket::Positive, &case("Pos_Fun_0001", "mama"), &config);

        assert_eq!(
            scenario.steps[0],
            ScenarioStep::Navigate {
                url: "https://www.swifttranslator.com/".to_string()
            }
        );
        assert!(matches!(
            scenario.steps[1],
            ScenarioStep::WaitVisible { timeout_ms: 10_000, .. }
        ));
        assert!(matches!(&scenario.steps[3], ScenarioStep::Fill { value, .. } if value == "mama"));
        assert_eq!(
            scenario.expectation,
            Expectation::ScriptPresent {
                observation: AFTER_FILL.to_string()
            }
        );
        assert_eq!(
            scenario.screenshot_path,
            PathBuf::from("test-results/screenshots/Pos_Fun_0001.png")
        );
        assert!(matches!(scenario.steps.last(), Some(ScenarioStep::Screenshot { .. })));
    }

    #[test]
    fn test_negative_plan_checks_visibility() {
        let config = HarnessConfig::default();
        let scenario = Scenario::plan(1, Bucket::Negative, &case("Neg_Fun_0001", "x"), &config);
        assert!(matches!(scenario.expectation, Expectation::InputVisible { .. }));
    }

    fn typed(scenario: &Scenario) -> Vec<&str> {
        scenario
            .steps
            .iter()
            .filter_map(|s| match s {
                ScenarioStep::Type { text, delay_ms, .. } => {
                    assert_eq!(*delay_ms, 100);
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ui_plan_types_two_bursts() {
        let config = HarnessConfig::default();
        let scenario = Scenario::plan(1, Bucket::Ui, &case("Pos_UI_0001", "api gedhara"), &config);

        assert_eq!(typed(&scenario), vec!["api", " gedhara"]);
        assert_eq!(
            scenario.expectation,
            Expectation::ScriptPresent {
                observation: "burst_2".to_string()
            }
        );
    }

    #[test]
    fn test_ui_plan_ignores_case_input() {
        let config = HarnessConfig::default();
        for input in ["", "single", "mama gedhara yanavaa"] {
            let scenario = Scenario::plan(1, Bucket::Ui, &case("Pos_UI_0002", input), &config);
            assert_eq!(typed(&scenario), vec!["api", " gedhara"], "input: {:?}", input);
        }
    }

    #[test]
    fn test_ui_plan_uses_configured_bursts() {
        let mut config = HarnessConfig::default();
        config.browser.ui_bursts = vec!["ma".to_string(), "ma".to_string(), " yanavaa".to_string()];
        let scenario = Scenario::plan(1, Bucket::Ui, &case("Pos_UI_0003", "x"), &config);

        assert_eq!(typed(&scenario), vec!["ma", "ma", " yanavaa"]);
        assert_eq!(
            scenario.expectation,
            Expectation::ScriptPresent {
                observation: "burst_3".to_string()
            }
        );
    }

    #[test]
    fn test_plan_suite_keeps_ordinals_when_filtered() {
        let mut suite = TestSuite::default();
        suite.push(Bucket::Positive, case("Pos_Fun_0001", "a"));
        suite.push(Bucket::Positive, case("Pos_Fun_0002", "b"));
        suite.push(Bucket::Negative, case("Neg_Fun_0001", "c"));
        suite.push(Bucket::Ui, case("Pos_UI_0001", "d e"));

        let config = HarnessConfig::default();
        let all = plan_suite(&suite, &config, &ScenarioFilter::default());
        assert_eq!(all.iter().map(|s| s.ordinal).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        let negative = plan_suite(
            &suite,
            &config,
            &ScenarioFilter {
                bucket: Some(Bucket::Negative),
                id: None,
            },
        );
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].ordinal, 3);

        let by_id = plan_suite(
            &suite,
            &config,
            &ScenarioFilter {
                bucket: None,
                id: Some("Pos_UI_0001".to_string()),
            },
        );
        assert_eq!(by_id[0].ordinal, 4);
        assert_eq!(by_id[0].title(), "Pos_UI_0001: name");
    }
}
