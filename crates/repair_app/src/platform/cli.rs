use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use repair_core::{Channel, Confirmation};

use super::logging::LogDestination;

/// Repair a broken BetterDiscord installation.
#[derive(Debug, Parser)]
#[command(name = "repair", version, long_about = None)]
pub struct Cli {
    /// RON file with channel paths and reinstall settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Install root of a channel, e.g. `stable=/opt/discord/resources` (repeatable)
    #[arg(long = "channel", global = true, value_parser = parse_channel_arg)]
    pub channels: Vec<(Channel, PathBuf)>,

    /// Override the application data directory (where `discord*` and
    /// `BetterDiscord` folders live)
    #[arg(long, global = true)]
    pub app_data: Option<PathBuf>,

    /// Answer every prompt without asking, for unattended runs
    #[arg(long, global = true, value_enum)]
    pub assume: Option<Answer>,

    /// Milliseconds to wait between phases
    #[arg(long, global = true)]
    pub pause_ms: Option<u64>,

    /// Log file (defaults to ./repair.log); `-` logs to the terminal only
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Also log to the terminal, at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Close Discord, delete shims and modules, then offer plugin removal and reinstall
    Repair,
    /// Delete the BetterDiscord plugins folder
    RemovePlugins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    Yes,
    No,
}

impl From<Answer> for Confirmation {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Yes => Confirmation::Yes,
            Answer::No => Confirmation::No,
        }
    }
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        if self.log_file.as_deref() == Some(Path::new("-")) {
            return LogDestination::Terminal;
        }
        let path = self
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./repair.log"));
        if self.verbose {
            LogDestination::Both(path)
        } else {
            LogDestination::File(path)
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Parses `channel=path`.
pub fn parse_channel_arg(raw: &str) -> Result<(Channel, PathBuf), String> {
    let (channel, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CHANNEL=PATH, got '{raw}'"))?;
    let channel = channel.parse::<Channel>().map_err(|err| err.to_string())?;
    if path.trim().is_empty() {
        return Err(format!("missing path for channel {channel}"));
    }
    Ok((channel, PathBuf::from(path.trim())))
}
