use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use repair_core::{
    update, Channel, ChannelConfig, Effect, LogKind, LogLine, Msg, Outcome, Platform, Prompt,
    RepairRequest, RepairState, StepResult, PHASE_PAUSE_MS,
};
use repair_logging::{repair_debug, repair_error, repair_info, repair_warn};

use crate::{
    erase, EraseError, EraseOutcome, InstallLayout, Installer, Presenter, ProcessTerminator,
};

#[derive(Debug, Clone)]
pub struct RepairSettings {
    /// Settle time between phases; a heuristic wait, not a poll.
    pub pause: Duration,
    pub platform: Platform,
    pub layout: InstallLayout,
}

impl RepairSettings {
    pub fn new(layout: InstallLayout) -> Self {
        Self {
            pause: Duration::from_millis(PHASE_PAUSE_MS),
            platform: Platform::current(),
            layout,
        }
    }
}

/// Executes the effects emitted by the core, one at a time, feeding each
/// result back before the next effect runs.
pub struct Repairer {
    settings: RepairSettings,
    terminator: Box<dyn ProcessTerminator>,
    installer: Box<dyn Installer>,
    state: RepairState,
}

impl Repairer {
    pub fn new(
        settings: RepairSettings,
        terminator: Box<dyn ProcessTerminator>,
        installer: Box<dyn Installer>,
    ) -> Self {
        Self {
            settings,
            terminator,
            installer,
            state: RepairState::new(),
        }
    }

    pub fn state(&self) -> &RepairState {
        &self.state
    }

    pub fn settings(&self) -> &RepairSettings {
        &self.settings
    }

    /// Full repair: kill, delete shims and modules, then the optional prompts.
    pub fn repair(&mut self, config: ChannelConfig, presenter: &mut dyn Presenter) -> Outcome {
        let request = RepairRequest {
            config,
            platform: self.settings.platform,
            plugins_dir: self.settings.layout.plugins_dir(),
        };
        self.run(Msg::RepairRequested(request), presenter)
    }

    /// Standalone removal of the plugins folder.
    pub fn remove_plugins(&mut self, presenter: &mut dyn Presenter) -> Outcome {
        let plugins_dir = self.settings.layout.plugins_dir();
        self.run(Msg::PluginRemovalRequested { plugins_dir }, presenter)
    }

    fn run(&mut self, first: Msg, presenter: &mut dyn Presenter) -> Outcome {
        let run = repair_logging::begin_run();
        repair_debug!("run={} starting with {:?}", run, first);

        let mut inbox = VecDeque::from([first]);

        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            if state.consume_dirty() {
                presenter.progress(&state.view());
            }
            self.state = state;

            for effect in effects {
                if let Some(reply) = self.execute(effect, presenter) {
                    inbox.push_back(reply);
                }
            }
        }

        let outcome = self.state.outcome().unwrap_or(Outcome::Failed);
        repair_info!("run={} finished: {:?}", run, outcome);
        outcome
    }

    fn execute(&self, effect: Effect, presenter: &mut dyn Presenter) -> Option<Msg> {
        match effect {
            Effect::Log(line) => {
                forward_to_log(&line);
                presenter.log(&line);
                None
            }
            Effect::TerminateProcesses { channel } => {
                let result = match self.terminator.terminate(channel) {
                    Ok(0) => StepResult::Noop,
                    Ok(_) => StepResult::Success,
                    Err(err) => StepResult::Failed(err.to_string()),
                };
                Some(Msg::ProcessesTerminated { channel, result })
            }
            Effect::Pause => {
                if !self.settings.pause.is_zero() {
                    thread::sleep(self.settings.pause);
                }
                Some(Msg::PauseElapsed)
            }
            Effect::EraseShim { channel, path } => Some(Msg::ShimErased {
                channel,
                result: erase_result(erase(&path)),
            }),
            Effect::EraseModules { channel } => Some(Msg::ModulesErased {
                channel,
                result: self.erase_modules(channel),
            }),
            Effect::Confirm(prompt) => {
                let answer = presenter.confirm(&prompt);
                repair_info!("{} -> {:?}", prompt.title(), answer);
                Some(match prompt {
                    Prompt::RemovePlugins { .. } => Msg::PluginPromptAnswered(answer),
                    Prompt::Reinstall => Msg::ReinstallPromptAnswered(answer),
                })
            }
            Effect::RemovePlugins { path } => {
                Some(Msg::PluginsRemoved(erase_result(erase(&path))))
            }
            Effect::Reinstall { config } => {
                let result = match self.installer.install(&config) {
                    Ok(()) => StepResult::Success,
                    Err(err) => StepResult::Failed(err.to_string()),
                };
                Some(Msg::ReinstallFinished(result))
            }
            Effect::Notify(notice) => {
                presenter.notify(notice);
                None
            }
            Effect::Finished(outcome) => {
                presenter.finished(outcome);
                None
            }
        }
    }

    fn erase_modules(&self, channel: Channel) -> StepResult {
        match self.settings.layout.modules_dir(channel) {
            Ok(path) => {
                repair_info!("Removing {}", path.display());
                erase_result(erase(&path))
            }
            Err(err) => StepResult::Failed(err.to_string()),
        }
    }
}

fn erase_result(result: Result<EraseOutcome, EraseError>) -> StepResult {
    match result {
        Ok(EraseOutcome::Deleted) => StepResult::Success,
        Ok(EraseOutcome::Noop) => StepResult::Noop,
        Err(err) => StepResult::Failed(err.to_string()),
    }
}

fn forward_to_log(line: &LogLine) {
    match line.kind {
        LogKind::Failure => repair_error!("{}", line),
        LogKind::Warning => repair_warn!("{}", line),
        LogKind::Paragraph | LogKind::Info | LogKind::Success => repair_info!("{}", line),
    }
}
