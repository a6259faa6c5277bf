use std::io;

use repair_core::ChannelConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("no reinstall command configured")]
    NotConfigured,
    #[error("could not start installer: {0}")]
    Spawn(#[from] io::Error),
    #[error("installer exited with {0}")]
    Exit(String),
}

/// Re-runs the mod installation for the repaired channels.
pub trait Installer {
    fn install(&self, config: &ChannelConfig) -> Result<(), InstallError>;
}
