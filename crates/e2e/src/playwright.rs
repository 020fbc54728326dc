//! Playwright browser automation
//!
//! Each scenario becomes one standalone Node.js script with its own browser,
//! so scenarios never share a page. The script prints a single JSON report
//! line on stdout; assertions are evaluated on the Rust side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use swifttest_common::config::SettleConfig;
use swifttest_common::Error::InvalidConfig;
use swifttest_common::HarnessConfig;

use crate::error::{E2eError, E2eResult};
use crate::scenario::{Scenario, ScenarioStep};
use crate::verdict::Observation;

/// Executes planned scenarios against a real or simulated browser
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn execute(&self, scenario: &Scenario) -> E2eResult<ScriptReport>;
}

/// What a scenario script reported back
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptReport {
    #[serde(default)]
    pub observations: Vec<Observation>,

    /// Set once the screenshot has been written
    #[serde(default)]
    pub screenshot: Option<PathBuf>,

    /// Message of the step that threw, if any
    #[serde(default)]
    pub error: Option<String>,
}

impl ScriptReport {
    /// Parse the last JSON object line of script stdout
    pub fn parse(stdout: &str) -> E2eResult<Self> {
        stdout
            .lines()
            .rev()
            .map(str::trim)
            .filter(|line| line.starts_with('{'))
            .find_map(|line| serde_json::from_str(line).ok())
            .ok_or_else(|| {
                let head: String = stdout.chars().take(200).collect();
                E2eError::ScriptOutput(format!("no report line in output: {}", head))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(format!("unknown browser '{}'", other)),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
    pub settle: SettleConfig,

    /// Directory holding the `playwright` package
    pub node_modules: PathBuf,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
            settle: SettleConfig::default(),
            node_modules: PathBuf::from("node_modules"),
        }
    }
}

impl PlaywrightConfig {
    /// Browser settings from the harness config; an unknown engine is rejected
    pub fn from_harness(config: &HarnessConfig) -> E2eResult<Self> {
        let browser = config
            .browser
            .engine
            .parse()
            .map_err(|e| InvalidConfig(format!("browser.engine: {}", e)))?;

        Ok(Self {
            viewport_width: config.browser.viewport_width,
            viewport_height: config.browser.viewport_height,
            browser,
            headless: config.browser.headless,
            settle: config.settle.clone(),
            node_modules: config.browser.node_modules.clone(),
        })
    }
}

/// Playwright browser handle
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        Ok(Self::unchecked(config))
    }

    /// Create a handle without probing for the Playwright CLI
    pub fn unchecked(config: PlaywrightConfig) -> Self {
        Self { config }
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Build the standalone script for a scenario
    pub fn build_script(&self, scenario: &Scenario) -> String {
        let settle = &self.config.settle;
        let mut script = String::new();

        script.push_str(&format!(
            r#"
let pw;
try {{ pw = require('playwright'); }} catch (_) {{ pw = require('@playwright/test'); }}

const policy = {{ initial: {initial}, max: {max}, timeout: {timeout} }};

// Poll with exponential backoff until content differs from `baseline` and is
// unchanged across two reads, or the deadline passes.
const settle = async (page, baseline) => {{
  const start = Date.now();
  let delay = policy.initial;
  let previous = null;
  for (;;) {{
    await page.waitForTimeout(delay);
    const content = await page.content();
    const elapsed = Date.now() - start;
    if (content !== baseline && content === previous) {{
      return {{ content, settled: true, elapsed }};
    }}
    if (elapsed >= policy.timeout) {{
      return {{ content, settled: false, elapsed }};
    }}
    previous = content;
    delay = Math.min(delay * 2, policy.max);
  }}
}};

(async () => {{
  const report = {{ observations: [], screenshot: null, error: null }};
  const screenshotPath = {screenshot};
  const browser = await pw.{browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  let baseline = '';

  try {{
"#,
            initial = settle.initial_delay_ms,
            max = settle.max_delay_ms,
            timeout = settle.timeout_ms,
            screenshot = js_path(&scenario.screenshot_path),
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
        ));

        for (i, step) in scenario.steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step_name(step)));
            script.push_str(&step_to_js(step));
            script.push('\n');
        }

        script.push_str(
            r#"
  } catch (error) {
    report.error = error.message;
    if (!report.screenshot) {
      try {
        await page.screenshot({ path: screenshotPath, fullPage: false });
        report.screenshot = screenshotPath;
      } catch (_) {}
    }
  } finally {
    await browser.close();
  }

  console.log(JSON.stringify(report));
})().catch((error) => {
  console.log(JSON.stringify({ observations: [], screenshot: null, error: error.message }));
  process.exit(1);
});
"#,
        );

        script
    }

    /// Run a script with node and return its stdout
    pub async fn run_script(&self, script: &str) -> E2eResult<String> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .env(
                "NODE_PATH",
                node_path(&self.config.node_modules, std::env::var_os("NODE_PATH").as_deref())?,
            )
            .kill_on_drop(true)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() && !stdout.contains('{') {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(stdout)
    }
}

#[async_trait]
impl BrowserDriver for PlaywrightHandle {
    async fn execute(&self, scenario: &Scenario) -> E2eResult<ScriptReport> {
        if let Some(dir) = scenario.screenshot_path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let script = self.build_script(scenario);
        let stdout = self.run_script(&script).await?;
        ScriptReport::parse(&stdout)
    }
}

/// Short description of a step for logs and script comments
pub fn step_name(step: &ScenarioStep) -> String {
    let name = match step {
        ScenarioStep::Navigate { url } => format!("navigate:{}", url),
        ScenarioStep::WaitVisible { selector, .. } => format!("wait:{}", selector),
        ScenarioStep::Clear { selector } => format!("clear:{}", selector),
        ScenarioStep::Fill { selector, .. } => format!("fill:{}", selector),
        ScenarioStep::Type { text, .. } => format!("type:{} chars", text.chars().count()),
        ScenarioStep::Settle { label, .. } => format!("settle:{}", label),
        ScenarioStep::Screenshot { path } => format!("screenshot:{}", path.display()),
    };
    name.replace('\n', " ")
}

/// Convert a step to JavaScript; every value goes through a JSON literal
fn step_to_js(step: &ScenarioStep) -> String {
    match step {
        ScenarioStep::Navigate { url } => format!(
            "    await page.goto({});\n    await page.waitForLoadState('networkidle');",
            js_str(url)
        ),
        ScenarioStep::WaitVisible { selector, timeout_ms } => format!(
            "    await page.locator({}).waitFor({{ state: 'visible', timeout: {} }});",
            js_str(selector),
            timeout_ms
        ),
        ScenarioStep::Clear { selector } => {
            format!("    await page.locator({}).clear();", js_str(selector))
        }
        ScenarioStep::Fill { selector, value } => format!(
            "    baseline = await page.content();\n    await page.locator({}).fill({});",
            js_str(selector),
            js_str(value)
        ),
        ScenarioStep::Type {
            selector,
            text,
            delay_ms,
        } => format!(
            "    baseline = await page.content();\n    await page.locator({}).pressSequentially({}, {{ delay: {} }});",
            js_str(selector),
            js_str(text),
            delay_ms
        ),
        ScenarioStep::Settle { label, selector } => format!(
            r#"    {{
      const settled = await settle(page, baseline);
      report.observations.push({{
        label: {label},
        content: settled.content,
        input_visible: await page.locator({selector}).isVisible(),
        settled: settled.settled,
        elapsed_ms: settled.elapsed,
      }});
      baseline = settled.content;
    }}"#,
            label = js_str(label),
            selector = js_str(selector),
        ),
        ScenarioStep::Screenshot { path } => format!(
            "    await page.screenshot({{ path: {}, fullPage: false }});\n    report.screenshot = {};",
            js_path(path),
            js_path(path)
        ),
    }
}

fn js_str(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn js_path(path: &Path) -> String {
    js_str(&path.to_string_lossy())
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// `NODE_PATH` with the configured modules directory ahead of any inherited entries
fn node_path(node_modules: &Path, inherited: Option<&OsStr>) -> E2eResult<OsString> {
    let mut paths = vec![absolute(node_modules)?];
    if let Some(inherited) = inherited {
        paths.extend(std::env::split_paths(inherited).filter(|p| !p.as_os_str().is_empty()));
    }
    std::env::join_paths(paths).map_err(|e| InvalidConfig(format!("browser.node_modules: {}", e)).into())
}
