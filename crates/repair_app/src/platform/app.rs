use std::io;
use std::time::Duration;

use anyhow::Result;
use repair_core::Outcome;
use repair_engine::{InstallLayout, RepairSettings, Repairer, SysinfoTerminator};
use repair_logging::repair_info;

use super::config::ConfigFile;
use super::installer::CommandInstaller;
use super::presenter::TerminalPresenter;
use super::{Cli, Command};

pub fn run_app(cli: &Cli) -> Result<Outcome> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let mut repairer = build_repairer(cli, &file)?;
    repair_info!(
        "Using application data at {:?}",
        repairer.settings().layout.app_data()
    );

    let stdin = io::stdin();
    let mut presenter =
        TerminalPresenter::new(stdin.lock(), io::stdout(), cli.assume.map(Into::into));

    let outcome = match cli.command {
        Command::Repair => {
            let channels = file.channel_config(&cli.channels)?;
            repairer.repair(channels, &mut presenter)
        }
        Command::RemovePlugins => repairer.remove_plugins(&mut presenter),
    };
    Ok(outcome)
}

fn build_repairer(cli: &Cli, file: &ConfigFile) -> Result<Repairer> {
    let layout = match cli.app_data.clone().or_else(|| file.app_data.clone()) {
        Some(app_data) => InstallLayout::new(app_data),
        None => InstallLayout::detect()?,
    };

    let mut settings = RepairSettings::new(layout);
    if let Some(pause_ms) = cli.pause_ms.or(file.pause_ms) {
        settings.pause = Duration::from_millis(pause_ms);
    }

    Ok(Repairer::new(
        settings,
        Box::new(SysinfoTerminator),
        Box::new(CommandInstaller::new(file.reinstall_command.clone())),
    ))
}
