//! Pass/fail evaluation of scenario observations

use regex::Regex;
use serde::{Deserialize, Serialize};

use swifttest_common::config::TargetConfig;
use swifttest_common::Error::InvalidConfig;

use crate::error::E2eResult;
use crate::scenario::Expectation;

/// Page state captured after a settle step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,

    /// Serialized page HTML
    #[serde(default)]
    pub content: String,

    /// Whether the input control was visible
    #[serde(default)]
    pub input_visible: bool,

    /// False if the settle deadline passed before content stabilised
    #[serde(default)]
    pub settled: bool,

    #[serde(default)]
    pub elapsed_ms: u64,
}

/// An inclusive Unicode codepoint range used as "output was rendered"
#[derive(Debug, Clone)]
pub struct ScriptRange {
    start: char,
    end: char,
    pattern: Regex,
}

impl ScriptRange {
    pub fn new(start: char, end: char) -> E2eResult<Self> {
        let pattern = Regex::new(&format!(r"[\x{{{:04X}}}-\x{{{:04X}}}]", start as u32, end as u32))
            .map_err(|e| InvalidConfig(format!("target script range: {}", e)))?;
        Ok(Self { start, end, pattern })
    }

    /// Sinhala block, U+0D80 to U+0DFF
    pub fn sinhala() -> Self {
        Self {
            start: '\u{0D80}',
            end: '\u{0DFF}',
            pattern: Regex::new(r"[\x{0D80}-\x{0DFF}]").expect("static pattern"),
        }
    }

    pub fn from_target(target: &TargetConfig) -> E2eResult<Self> {
        Self::new(target.script_start, target.script_end)
    }

    /// Whether `text` contains at least one character in the range
    pub fn contains(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl std::fmt::Display for ScriptRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U+{:04X}..U+{:04X}", self.start as u32, self.end as u32)
    }
}

/// Apply an expectation to the observations a scenario reported.
///
/// Returns the failure message on failure.
pub fn verdict(
    expectation: &Expectation,
    observations: &[Observation],
    script: &ScriptRange,
    input: &str,
) -> Result<(), String> {
    let find = |label: &str| {
        observations
            .iter()
            .find(|o| o.label == label)
            .ok_or_else(|| format!("no observation recorded for '{}'", label))
    };

    match expectation {
        Expectation::ScriptPresent { observation } => {
            let obs = find(observation)?;
            if script.contains(&obs.content) {
                Ok(())
            } else {
                Err(format!(
                    "Output should contain {} characters for input: {}{}",
                    script,
                    input,
                    settle_note(obs)
                ))
            }
        }
        Expectation::InputVisible { observation } => {
            let obs = find(observation)?;
            if obs.input_visible {
                Ok(())
            } else {
                Err(format!("Page should remain functional{}", settle_note(obs)))
            }
        }
    }
}

fn settle_note(obs: &Observation) -> String {
    if obs.settled {
        String::new()
    } else {
        format!(" (content had not settled after {} ms)", obs.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::E2eError;
    use test_case::test_case;

    #[test]
    fn test_reversed_range_is_a_config_error() {
        let target = TargetConfig {
            script_start: '\u{0DFF}',
            script_end: '\u{0D80}',
            ..Default::default()
        };

        let err = ScriptRange::from_target(&target).unwrap_err();
        assert!(matches!(err, E2eError::Common(InvalidConfig(_))));
        assert!(err.to_string().contains("target script range"));
    }

    fn observation(label: &str, content: &str, input_visible: bool) -> Observation {
        Observation {
            label: label.to_string(),
            content: content.to_string(),
            input_visible,
            settled: true,
            elapsed_ms: 300,
        }
    }

    #[test_case("<div>මම ගෙදර යනවා</div>", true ; "sinhala output")]
    #[test_case("<div>mama gedhara yanavaa</div>", false ; "latin only")]
    #[test_case("<div>\u{0D80}</div>", true ; "range start")]
    #[test_case("<div>\u{0DFF}</div>", true ; "range end")]
    #[test_case("<div>\u{0E00}</div>", false ; "thai is outside")]
    #[test_case("", false ; "empty")]
    fn test_sinhala_detection(content: &str, expected: bool) {
        assert_eq!(ScriptRange::sinhala().contains(content), expected);
    }

    #[test]
    fn test_configured_range_matches_default() {
        let range = ScriptRange::from_target(&TargetConfig::default()).unwrap();
        assert!(range.contains("අ"));
        assert_eq!(range.to_string(), "U+0D80..U+0DFF");
    }

    #[test]
    fn test_script_present_verdict() {
        let expectation = Expectation::ScriptPresent {
            observation: "after_fill".to_string(),
        };
        let script = ScriptRange::sinhala();

        let ok = [observation("after_fill", "<p>ආයුබෝවන්</p>", true)];
        assert!(verdict(&expectation, &ok, &script, "aayuboovan").is_ok());

        let mut unsettled = observation("after_fill", "<p>aayuboovan</p>", true);
        unsettled.settled = false;
        let err = verdict(&expectation, &[unsettled], &script, "aayuboovan").unwrap_err();
        assert!(err.contains("aayuboovan"));
        assert!(err.contains("had not settled"));
    }

    #[test]
    fn test_input_visible_verdict() {
        let expectation = Expectation::InputVisible {
            observation: "after_fill".to_string(),
        };
        let script = ScriptRange::sinhala();

        assert!(verdict(&expectation, &[observation("after_fill", "", true)], &script, "").is_ok());
        assert_eq!(
            verdict(&expectation, &[observation("after_fill", "", false)], &script, ""),
            Err("Page should remain functional".to_string())
        );
    }

    #[test]
    fn test_missing_observation_fails() {
        let expectation = Expectation::ScriptPresent {
            observation: "burst_2".to_string(),
        };
        let err = verdict(
            &expectation,
            &[observation("burst_1", "අ", true)],
            &ScriptRange::sinhala(),
            "",
        )
        .unwrap_err();
        assert!(err.contains("burst_2"));
    }
}
