//! Repair engine: filesystem and process side of the workflow, plus the
//! effect runner that drives the pure core.
mod erase;
mod install;
mod paths;
mod presenter;
mod process;
mod runner;

pub use erase::{erase, EraseError, EraseOutcome};
pub use install::{InstallError, Installer};
pub use paths::{latest_version_dir, InstallLayout, ResolveError, MODULES_DIR_NAME};
pub use presenter::Presenter;
pub use process::{process_matches, ProcessTerminator, SysinfoTerminator, TerminateError};
pub use runner::{RepairSettings, Repairer};
