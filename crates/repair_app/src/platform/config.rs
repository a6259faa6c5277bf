//! RON configuration file for the repair binary.
//!
//! ```ron
//! (
//!     channels: { "stable": "C:/Users/me/AppData/Local/Discord/app-1.0.9003/resources" },
//!     app_data: None,
//!     pause_ms: Some(200),
//!     reinstall_command: Some(["betterdiscord-installer", "--install"]),
//! )
//! ```
//! Every field is optional; command-line flags win over file values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use repair_core::{Channel, ChannelConfig};
use repair_logging::repair_info;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub channels: BTreeMap<String, PathBuf>,
    pub app_data: Option<PathBuf>,
    pub pause_ms: Option<u64>,
    pub reinstall_command: Option<Vec<String>>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        repair_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Channel map from the file, overlaid with `overrides` from the command line.
    pub fn channel_config(&self, overrides: &[(Channel, PathBuf)]) -> Result<ChannelConfig> {
        let mut config = ChannelConfig::new();
        for (key, root) in &self.channels {
            let channel: Channel = key.parse()?;
            config.insert(channel, root.clone());
        }
        for (channel, root) in overrides {
            config.insert(*channel, root.clone());
        }
        Ok(config)
    }
}
