use std::path::PathBuf;

use crate::{Channel, ChannelConfig, LogLine, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Log(LogLine),
    TerminateProcesses { channel: Channel },
    /// Fixed settle time so the OS can finish tearing processes down.
    Pause,
    EraseShim { channel: Channel, path: PathBuf },
    /// The runner resolves the newest version directory before erasing.
    EraseModules { channel: Channel },
    Confirm(Prompt),
    RemovePlugins { path: PathBuf },
    Reinstall { config: ChannelConfig },
    Notify(Notice),
    Finished(Outcome),
}

/// Blocking yes/no question for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    RemovePlugins { plugins_dir: PathBuf },
    Reinstall,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self {
            Prompt::RemovePlugins { .. } => "Remove BetterDiscord plugins?",
            Prompt::Reinstall => "Reinstall BetterDiscord?",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Prompt::RemovePlugins { .. } => "Remove BetterDiscord plugins?",
            Prompt::Reinstall => {
                "After repairing, you need to reinstall BetterDiscord. Would you like to do that now?"
            }
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Prompt::RemovePlugins { plugins_dir } => Some(format!(
                "If you are repairing due to a plugins issue, or crashing, backup your plugins and then answer \"yes\".\n\
                 If you are repairing for other reasons, or do not want to remove your plugins, answer \"no\".\n\
                 Plugins folder can be found at {}.\n\
                 Note: This will not touch any other folder or files.",
                plugins_dir.display()
            )),
            Prompt::Reinstall => None,
        }
    }
}

/// Informational message; acknowledged by the user but carries no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    KillFailed,
    RelaunchManually,
}

impl Notice {
    pub fn title(self) -> &'static str {
        match self {
            Notice::KillFailed => "Could not close Discord",
            Notice::RelaunchManually => "Reinstall Complete",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::KillFailed => {
                "Discord could not be terminated. Please close every Discord window manually and try again."
            }
            Notice::RelaunchManually => "Please relaunch discord manually to finish the repair.",
        }
    }
}
