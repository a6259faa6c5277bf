use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Release track of the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Stable,
    Ptb,
    Canary,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Stable, Channel::Ptb, Channel::Canary];

    /// Canonical config key.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Stable => "stable",
            Channel::Ptb => "ptb",
            Channel::Canary => "canary",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Channel::Stable => "Discord",
            Channel::Ptb => "Discord PTB",
            Channel::Canary => "Discord Canary",
        }
    }

    /// Folder under the platform config directory holding the channel's
    /// versioned user data (display name, spaces removed, lower-cased).
    pub fn data_dir_name(self) -> &'static str {
        match self {
            Channel::Stable => "discord",
            Channel::Ptb => "discordptb",
            Channel::Canary => "discordcanary",
        }
    }

    /// Executable stem of the channel's processes, lowercase with spaces removed.
    pub fn process_stem(self) -> &'static str {
        self.data_dir_name()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChannelError(pub String);

impl fmt::Display for ParseChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown channel '{}' (expected stable, ptb/beta or canary/nightly)",
            self.0
        )
    }
}

impl std::error::Error for ParseChannelError {}

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stable" => Ok(Channel::Stable),
            "ptb" | "beta" => Ok(Channel::Ptb),
            "canary" | "nightly" => Ok(Channel::Canary),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}

/// Operating system the workflow targets. Module cleanup is skipped on Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Modules are left behind on Linux; the phase only advances progress there.
    pub fn skips_module_cleanup(self) -> bool {
        matches!(self, Platform::Linux)
    }
}

/// Mapping from channel to the install root holding its injected shim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelConfig {
    roots: BTreeMap<Channel, PathBuf>,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and CLI assembly.
    pub fn with(mut self, channel: Channel, root: impl Into<PathBuf>) -> Self {
        self.insert(channel, root);
        self
    }

    /// Replaces and returns any previous root for `channel`.
    pub fn insert(&mut self, channel: Channel, root: impl Into<PathBuf>) -> Option<PathBuf> {
        self.roots.insert(channel, root.into())
    }

    pub fn get(&self, channel: Channel) -> Option<&Path> {
        self.roots.get(&channel).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.roots.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Path)> {
        self.roots.iter().map(|(channel, root)| (*channel, root.as_path()))
    }

    /// Sanity check run before any destructive step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roots.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (channel, root) in self.iter() {
            if root.as_os_str().is_empty() {
                return Err(ConfigError::EmptyPath { channel });
            }
            if !root.has_root() {
                return Err(ConfigError::RelativePath {
                    channel,
                    path: root.to_path_buf(),
                });
            }
            if root.parent().is_none() {
                return Err(ConfigError::FilesystemRoot {
                    channel,
                    path: root.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(Channel, PathBuf)> for ChannelConfig {
    fn from_iter<I: IntoIterator<Item = (Channel, PathBuf)>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Empty,
    EmptyPath { channel: Channel },
    RelativePath { channel: Channel, path: PathBuf },
    FilesystemRoot { channel: Channel, path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Empty => write!(f, "no channels configured"),
            ConfigError::EmptyPath { channel } => {
                write!(f, "channel {channel} has an empty install path")
            }
            ConfigError::RelativePath { channel, path } => {
                write!(
                    f,
                    "channel {channel} install path is not absolute: {}",
                    path.display()
                )
            }
            ConfigError::FilesystemRoot { channel, path } => {
                write!(
                    f,
                    "channel {channel} install path is a filesystem root: {}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
