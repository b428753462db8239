//! Configuration management

use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use mark_timer::{Clock, Timer, DEFAULT_NAME, DEFAULT_PRECISION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub name: String,
    /// Fractional digits kept by `since_start`, `since_last` and diffs
    pub precision: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl TimerConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading timer config {}", path))?;
        let config: TimerConfig = toml::from_str(&content)
            .with_context(|| format!("parsing timer config {}", path))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn build(&self) -> Timer {
        Timer::with_precision(self.name.clone(), self.precision)
    }

    pub fn build_with_clock<C: Clock>(&self, clock: C) -> Timer<C> {
        Timer::with_clock(self.name.clone(), self.precision, clock)
    }
}
