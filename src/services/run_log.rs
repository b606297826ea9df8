use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Human-readable status lines written next to the calendar each run
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Overwrite `path` with the collected lines
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut text = self.lines.join("\n");
        text.push('\n');
        fs::write(path, text).with_context(|| format!("Failed to write run log {}", path.display()))
    }
}
