//! TOML run configuration -- the group registry plus scheduling knobs.
//!
//! ```toml
//! data-dir = "data"
//! min-coordinators = 2
//! timeout-secs = 30
//!
//! [coordinator]
//! id = "media"
//! url = "https://www.when2meet.com/?11111111-aaaaa"
//!
//! [[groups]]
//! id = "port-alpha"
//! url = "https://www.when2meet.com/?22222222-bbbbb"
//!
//! [[groups]]
//! id = "port-beta"
//! url = "https://www.when2meet.com/?33333333-ccccc"
//! ```
//!
//! Everything but `coordinator` has a default; `groups` keeps file order,
//! which becomes report order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use portcall_core::merge::DEFAULT_MIN_COORDINATORS;
use portcall_core::schedule::{GroupRegistry, GroupSpec};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Directory holding one `<group>.csv` per group.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Minimum coordinators that must be available in any kept slot.
    #[serde(default = "default_min_coordinators")]
    pub min_coordinators: usize,
    /// Acquisition deadline per group, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub coordinator: GroupSpec,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

impl Config {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// The registry the orchestrator consumes.
    pub fn registry(&self) -> GroupRegistry {
        GroupRegistry {
            coordinator: self.coordinator.clone(),
            groups: self.groups.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_min_coordinators() -> usize {
    DEFAULT_MIN_COORDINATORS
}

fn default_timeout_secs() -> u64 {
    30
}
