//! TOML configuration for the headless runner.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use pacman_core::DEFAULT_TICK_INTERVAL_MS;
use pacman_system_champions::DEFAULT_CAPACITY;
use serde::Deserialize;

const DEFAULT_PLAYER_NAME: &str = "player";
const DEFAULT_MAX_TICKS: u64 = 20_000;

/// Settings read from the optional `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    pub(crate) clock: ClockConfig,
    pub(crate) champions: ChampionsConfig,
    pub(crate) session: SessionConfig,
}

/// `[clock]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ClockConfig {
    pub(crate) interval_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// `[champions]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ChampionsConfig {
    pub(crate) capacity: usize,
}

impl Default for ChampionsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// `[session]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    pub(crate) best_score: u32,
    pub(crate) player_name: String,
    pub(crate) max_ticks: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            best_score: 0,
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl CliConfig {
    /// Reads and parses the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Interval between two simulation ticks; never zero.
    pub(crate) fn interval(&self) -> Duration {
        Duration::from_millis(self.clock.interval_ms.max(1))
    }
}
