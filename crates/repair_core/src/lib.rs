//! Repair core: pure workflow state machine and view-model helpers.
mod channel;
mod effect;
mod log_line;
mod msg;
mod progress;
mod state;
mod update;
mod view_model;

pub use channel::{Channel, ChannelConfig, ConfigError, ParseChannelError, Platform};
pub use effect::{Effect, Notice, Prompt};
pub use log_line::{LogKind, LogLine};
pub use msg::{Confirmation, Msg, RepairRequest, StepResult};
pub use progress::{
    Progress, DELETE_MODULE_DIRS_PROGRESS, DELETE_SHIM_DIRS_PROGRESS, KILL_PROGRESS,
    PLUGIN_REMOVAL_PROGRESS, REINSTALL_PROGRESS,
};
pub use state::{Outcome, Phase, RepairState, Workflow, PHASE_PAUSE_MS, SHIM_DIR_NAME};
pub use update::update;
pub use view_model::RepairViewModel;
