//! JSON snapshot of the normalized suite

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::types::TestSuite;

impl TestSuite {
    /// Write the suite as pretty JSON, replacing any existing file
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        info!("Updated: {}", path.display());
        Ok(())
    }

    /// Read a snapshot written by [`TestSuite::write_snapshot`]
    pub fn read_snapshot(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
