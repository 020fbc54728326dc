//! Harness configuration
//!
//! Every section has defaults matching the SwiftTranslator test sheet, so an
//! absent `swifttest.toml` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Harness configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Source workbook
    pub workbook: WorkbookConfig,

    /// Sheet layout
    pub sheet: SheetConfig,

    /// JSON snapshot output
    pub snapshot: SnapshotConfig,

    /// Application under test
    pub target: TargetConfig,

    /// Browser settings
    pub browser: BrowserConfig,

    /// Polling policy used while waiting for rendering to settle
    pub settle: SettleConfig,

    /// Scenario execution
    pub runner: RunnerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    pub path: PathBuf,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("test-data/IT23763180_Test_Case.xlsx"),
        }
    }
}

/// Positional contract with the source sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Sheet to read
    pub name: String,

    /// Leading rows to skip
    pub header_rows: usize,

    pub columns: ColumnLayout,

    /// Line mapping for the category cell
    pub category: CategoryLayout,

    /// Override for negative rows, whose category cells may be laid out differently
    pub negative_category: Option<CategoryLayout>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            name: "IT23763180".to_string(),
            header_rows: 1,
            columns: ColumnLayout::default(),
            category: CategoryLayout::default(),
            negative_category: None,
        }
    }
}

/// Zero-based column indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub id: usize,
    pub name: usize,
    pub length_type: usize,
    pub input: usize,
    pub expected_output: usize,
    pub category: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: 0,
            name: 1,
            length_type: 2,
            input: 3,
            expected_output: 4,
            category: 8,
        }
    }
}

/// Zero-based line indexes within the cleaned category cell.
///
/// The default skips line 2, which holds the length annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLayout {
    pub input_type: usize,
    pub sentence_focus: usize,
    pub quality_focus: usize,
}

impl Default for CategoryLayout {
    fn default() -> Self {
        Self {
            input_type: 0,
            sentence_focus: 1,
            quality_focus: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("test-data/test-cases.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Root of the single-page application
    pub base_url: String,

    /// Exact placeholder of the transliteration input
    pub input_placeholder: String,

    /// First codepoint of the output script (inclusive)
    pub script_start: char,

    /// Last codepoint of the output script (inclusive)
    pub script_end: char,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.swifttranslator.com".to_string(),
            input_placeholder: "Input Your Singlish Text Here.".to_string(),
            script_start: '\u{0D80}',
            script_end: '\u{0DFF}',
        }
    }
}

impl TargetConfig {
    /// CSS selector for the input control
    pub fn input_selector(&self) -> String {
        format!(
            "textarea[placeholder=\"{}\"]",
            self.input_placeholder.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// chromium, firefox or webkit
    pub engine: String,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Ceiling for the input control to become visible
    pub visibility_timeout_ms: u64,

    /// Per-key delay for incremental typing
    pub typing_delay_ms: u64,

    /// Bursts typed in order by every UI scenario
    pub ui_bursts: Vec<String>,

    pub screenshot_dir: PathBuf,

    /// Searched first when the generated scripts resolve `playwright`
    pub node_modules: PathBuf,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            engine: "chromium".to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            visibility_timeout_ms: 10_000,
            typing_delay_ms: 100,
            ui_bursts: vec!["api".to_string(), " gedhara".to_string()],
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            node_modules: PathBuf::from("node_modules"),
        }
    }
}

/// Exponential backoff while polling page content for a stable render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub timeout_ms: u64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 100,
            max_delay_ms: 1_600,
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    /// Scenarios allowed to run at once; 1 keeps execution serial
    pub workers: usize,

    /// Deadline for one scenario, including browser launch
    pub scenario_timeout_secs: u64,

    /// Directory for the run report
    pub output_dir: PathBuf,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            workers: 1,
            scenario_timeout_secs: 120,
            output_dir: PathBuf::from("test-results"),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl SheetConfig {
    /// Category layout for a row of the given bucket
    pub fn category_layout(&self, bucket: crate::Bucket) -> &CategoryLayout {
        match (bucket, &self.negative_category) {
            (crate::Bucket::Negative, Some(layout)) => layout,
            _ => &self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = HarnessConfig::load(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.sheet.name, "IT23763180");
        assert_eq!(config.sheet.columns.category, 8);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: HarnessConfig = toml::from_str(
            r#"
[sheet]
name = "Sheet2"

[sheet.negative_category]
input_type = 0
sentence_focus = 1
quality_focus = 2

[runner]
workers = 4
"#,
        )
        .unwrap();

        assert_eq!(config.sheet.name, "Sheet2");
        assert_eq!(config.sheet.header_rows, 1);
        assert_eq!(config.runner.workers, 4);
        assert_eq!(config.runner.scenario_timeout_secs, 120);
        assert_eq!(config.sheet.category_layout(crate::Bucket::Negative).quality_focus, 2);
        assert_eq!(config.sheet.category_layout(crate::Bucket::Positive).quality_focus, 3);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/swifttest.toml");

        let mut config = HarnessConfig::default();
        config.target.base_url = "http://127.0.0.1:3000".to_string();
        config.save(&path).unwrap();

        assert_eq!(HarnessConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_input_selector() {
        let target = TargetConfig::default();
        assert_eq!(
            target.input_selector(),
            r#"textarea[placeholder="Input Your Singlish Text Here."]"#
        );
    }
}
