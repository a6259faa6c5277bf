use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::view_model::RepairViewModel;
use crate::{Channel, Progress, RepairRequest};

/// Directory the mod injects under each install root.
pub const SHIM_DIR_NAME: &str = "app";
/// Settle time requested between the kill, shim and module phases.
pub const PHASE_PAUSE_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    KillingProcesses,
    DeletingShims,
    DeletingModules,
    ConfirmingPluginRemoval,
    RemovingPlugins,
    ConfirmingReinstall,
    Reinstalling,
    Done,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}

/// Which independent operation owns the current progress lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Repair,
    PluginRemoval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepairState {
    workflow: Option<Workflow>,
    phase: Phase,
    progress: Progress,
    request: Option<RepairRequest>,
    plugins_dir: Option<PathBuf>,
    pending: VecDeque<Channel>,
    step: f64,
    awaiting_pause: bool,
    outcome: Option<Outcome>,
    dirty: bool,
}

impl RepairState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> RepairViewModel {
        RepairViewModel {
            workflow: self.workflow,
            phase: self.phase,
            progress: self.progress.value(),
            percent: self.progress.percent(),
            outcome: self.outcome,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Idle) && !self.phase.is_terminal()
    }

    pub(crate) fn workflow(&self) -> Option<Workflow> {
        self.workflow
    }

    /// Starts a new run: clears leftovers of any previous run and resets progress.
    pub(crate) fn begin(&mut self, workflow: Workflow, plugins_dir: PathBuf) {
        self.workflow = Some(workflow);
        self.phase = Phase::Validating;
        self.progress.reset();
        self.request = None;
        self.plugins_dir = Some(plugins_dir);
        self.pending.clear();
        self.step = 0.0;
        self.awaiting_pause = false;
        self.outcome = None;
        self.mark_dirty();
    }

    pub(crate) fn set_request(&mut self, request: RepairRequest) {
        self.request = Some(request);
    }

    pub(crate) fn request(&self) -> Option<&RepairRequest> {
        self.request.as_ref()
    }

    pub(crate) fn plugins_dir(&self) -> Option<&Path> {
        self.plugins_dir.as_deref()
    }

    pub(crate) fn root_of(&self, channel: Channel) -> Option<&Path> {
        self.request.as_ref().and_then(|r| r.config.get(channel))
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.mark_dirty();
    }

    /// Queues every configured channel for the current phase and computes the
    /// per-item increment toward `milestone`.
    pub(crate) fn queue_channels(&mut self, milestone: f64) {
        let channels = self
            .request
            .as_ref()
            .map(|r| r.config.channels())
            .unwrap_or_default();
        self.step = self.progress.step_toward(milestone, channels.len());
        self.pending = channels.into();
    }

    pub(crate) fn current_item(&self) -> Option<Channel> {
        self.pending.front().copied()
    }

    /// Completes the current item and returns the next one, if any.
    pub(crate) fn complete_item(&mut self) -> Option<Channel> {
        self.pending.pop_front();
        self.progress.advance(self.step);
        self.mark_dirty();
        self.current_item()
    }

    pub(crate) fn set_awaiting_pause(&mut self, awaiting: bool) {
        self.awaiting_pause = awaiting;
    }

    pub(crate) fn awaiting_pause(&self) -> bool {
        self.awaiting_pause
    }

    pub(crate) fn set_progress(&mut self, value: f64) {
        self.progress.set(value);
        self.mark_dirty();
    }

    pub(crate) fn reset_progress(&mut self) {
        self.progress.reset();
        self.mark_dirty();
    }

    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.phase = match outcome {
            Outcome::Succeeded => Phase::Done,
            Outcome::Failed => Phase::Failed,
        };
        self.outcome = Some(outcome);
        self.pending.clear();
        self.awaiting_pause = false;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
