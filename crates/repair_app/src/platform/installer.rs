use std::process::Command;

use repair_core::ChannelConfig;
use repair_engine::{InstallError, Installer};
use repair_logging::repair_info;

/// Environment variable carrying `channel=path` pairs separated by `;`.
pub const CHANNELS_ENV: &str = "REPAIR_CHANNELS";

/// Reinstalls by running an external installer command.
#[derive(Debug, Clone, Default)]
pub struct CommandInstaller {
    command: Option<Vec<String>>,
}

impl CommandInstaller {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self {
            command: command.filter(|argv| !argv.is_empty()),
        }
    }
}

impl Installer for CommandInstaller {
    fn install(&self, config: &ChannelConfig) -> Result<(), InstallError> {
        let Some((program, args)) = self.command.as_deref().and_then(<[String]>::split_first)
        else {
            return Err(InstallError::NotConfigured);
        };

        repair_info!("Running installer {} {:?}", program, args);
        let status = Command::new(program)
            .args(args)
            .env(CHANNELS_ENV, channels_env(config))
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(InstallError::Exit(status.to_string()))
        }
    }
}

pub fn channels_env(config: &ChannelConfig) -> String {
    config
        .iter()
        .map(|(channel, root)| format!("{channel}={}", root.display()))
        .collect::<Vec<_>>()
        .join(";")
}
