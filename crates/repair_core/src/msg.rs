use std::path::PathBuf;

use crate::{Channel, ChannelConfig, Platform};

/// Everything a repair run needs up front; immutable for the run's duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRequest {
    pub config: ChannelConfig,
    pub platform: Platform,
    pub plugins_dir: PathBuf,
}

/// Result of a single step, as reported back by the effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Success,
    /// Target did not exist; logged and treated as success.
    Noop,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start a full repair run.
    RepairRequested(RepairRequest),
    /// Start a standalone plugin-removal run.
    PluginRemovalRequested { plugins_dir: PathBuf },
    /// Termination finished for one channel.
    ProcessesTerminated { channel: Channel, result: StepResult },
    /// The settle pause between phases is over.
    PauseElapsed,
    /// The `app` directory of one channel was handled.
    ShimErased { channel: Channel, result: StepResult },
    /// The `modules` directory of one channel was handled.
    ModulesErased { channel: Channel, result: StepResult },
    /// User answered the plugin-removal prompt.
    PluginPromptAnswered(Confirmation),
    PluginsRemoved(StepResult),
    /// User answered the reinstall prompt.
    ReinstallPromptAnswered(Confirmation),
    ReinstallFinished(StepResult),
}
