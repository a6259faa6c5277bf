use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use repair_core::Channel;
use thiserror::Error;

/// Host-owned directory holding native modules, under the newest version directory.
pub const MODULES_DIR_NAME: &str = "modules";
const MOD_DATA_DIR_NAME: &str = "BetterDiscord";
const PLUGINS_DIR_NAME: &str = "plugins";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not determine the user's application data directory")]
    NoAppData,
    #[error("{} does not exist", .0.display())]
    MissingRoot(PathBuf),
    #[error("no versioned directory found in {}", .0.display())]
    NoVersionDir(PathBuf),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where per-user data of the host and of the mod lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    app_data: PathBuf,
}

impl InstallLayout {
    pub fn new(app_data: impl Into<PathBuf>) -> Self {
        Self {
            app_data: app_data.into(),
        }
    }

    /// Uses the platform configuration directory (Roaming AppData,
    /// Application Support or `$XDG_CONFIG_HOME`).
    pub fn detect() -> Result<Self, ResolveError> {
        directories::BaseDirs::new()
            .map(|dirs| Self::new(dirs.config_dir()))
            .ok_or(ResolveError::NoAppData)
    }

    pub fn app_data(&self) -> &Path {
        &self.app_data
    }

    pub fn user_data_dir(&self, channel: Channel) -> PathBuf {
        self.app_data.join(channel.data_dir_name())
    }

    pub fn modules_dir(&self, channel: Channel) -> Result<PathBuf, ResolveError> {
        let version_dir = latest_version_dir(&self.user_data_dir(channel))?;
        Ok(version_dir.join(MODULES_DIR_NAME))
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.app_data.join(MOD_DATA_DIR_NAME).join(PLUGINS_DIR_NAME)
    }
}

/// Picks the lexicographically greatest dotted subdirectory of `root`.
///
/// Names are compared as strings, so `0.0.9` wins over `0.0.10`. This matches
/// the installer's historical behaviour and is kept on purpose.
pub fn latest_version_dir(root: &Path) -> Result<PathBuf, ResolveError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ResolveError::MissingRoot(root.to_path_buf()))
        }
        Err(source) => {
            return Err(ResolveError::Io {
                path: root.to_path_buf(),
                source,
            })
        }
    };

    let mut versions: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            fs::symlink_metadata(entry.path())
                .map(|meta| meta.is_dir())
                .unwrap_or(false)
        })
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.split('.').count() > 1)
        .collect();
    versions.sort();

    versions
        .pop()
        .map(|name| root.join(name))
        .ok_or_else(|| ResolveError::NoVersionDir(root.to_path_buf()))
}
