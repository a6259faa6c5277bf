use std::path::PathBuf;

use crate::{
    Channel, Confirmation, Effect, LogLine, Msg, Notice, Outcome, Phase, Prompt, RepairRequest,
    RepairState, StepResult, Workflow, DELETE_MODULE_DIRS_PROGRESS, DELETE_SHIM_DIRS_PROGRESS,
    KILL_PROGRESS, PLUGIN_REMOVAL_PROGRESS, REINSTALL_PROGRESS, SHIM_DIR_NAME,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not belong to the current phase are ignored, so a stale
/// result can never advance a run that has already failed or moved on.
pub fn update(mut state: RepairState, msg: Msg) -> (RepairState, Vec<Effect>) {
    let effects = match msg {
        Msg::RepairRequested(request) => {
            if state.is_running() {
                return (state, Vec::new());
            }
            start_repair(&mut state, request)
        }
        Msg::PluginRemovalRequested { plugins_dir } => {
            if state.is_running() {
                return (state, Vec::new());
            }
            state.begin(Workflow::PluginRemoval, plugins_dir);
            start_plugin_removal(&mut state)
        }
        Msg::ProcessesTerminated { channel, result } => {
            if !is_current(&state, Phase::KillingProcesses, channel) {
                return (state, Vec::new());
            }
            on_terminated(&mut state, channel, result)
        }
        Msg::PauseElapsed => {
            if !state.awaiting_pause() {
                return (state, Vec::new());
            }
            state.set_awaiting_pause(false);
            on_pause_elapsed(&mut state)
        }
        Msg::ShimErased { channel, result } => {
            if !is_current(&state, Phase::DeletingShims, channel) {
                return (state, Vec::new());
            }
            on_shim_erased(&mut state, channel, result)
        }
        Msg::ModulesErased { channel, result } => {
            if !is_current(&state, Phase::DeletingModules, channel) {
                return (state, Vec::new());
            }
            on_modules_erased(&mut state, channel, result)
        }
        Msg::PluginPromptAnswered(answer) => {
            if state.phase() != Phase::ConfirmingPluginRemoval {
                return (state, Vec::new());
            }
            match answer {
                Confirmation::Yes => start_plugin_removal(&mut state),
                Confirmation::No => ask_reinstall(&mut state),
            }
        }
        Msg::PluginsRemoved(result) => {
            if state.phase() != Phase::RemovingPlugins {
                return (state, Vec::new());
            }
            on_plugins_removed(&mut state, result)
        }
        Msg::ReinstallPromptAnswered(answer) => {
            if state.phase() != Phase::ConfirmingReinstall {
                return (state, Vec::new());
            }
            match answer {
                Confirmation::Yes => start_reinstall(&mut state),
                Confirmation::No => finish(&mut state, Outcome::Succeeded),
            }
        }
        Msg::ReinstallFinished(result) => {
            if state.phase() != Phase::Reinstalling {
                return (state, Vec::new());
            }
            on_reinstall_finished(&mut state, result)
        }
    };

    (state, effects)
}

fn is_current(state: &RepairState, phase: Phase, channel: Channel) -> bool {
    state.phase() == phase && !state.awaiting_pause() && state.current_item() == Some(channel)
}

fn start_repair(state: &mut RepairState, request: RepairRequest) -> Vec<Effect> {
    state.begin(Workflow::Repair, request.plugins_dir.clone());

    if let Err(err) = request.config.validate() {
        let mut effects = vec![Effect::Log(LogLine::failure(format!(
            "Invalid configuration: {err}"
        )))];
        effects.extend(finish(state, Outcome::Failed));
        return effects;
    }

    state.set_request(request);
    state.enter(Phase::KillingProcesses);
    state.queue_channels(KILL_PROGRESS);

    let mut effects = vec![Effect::Log(LogLine::paragraph("Killing Discord..."))];
    if let Some(channel) = state.current_item() {
        effects.push(Effect::TerminateProcesses { channel });
    }
    effects
}

fn on_terminated(state: &mut RepairState, channel: Channel, result: StepResult) -> Vec<Effect> {
    let mut effects = Vec::new();
    match result {
        StepResult::Failed(message) => {
            effects.push(Effect::Log(LogLine::failure(format!(
                "Could not terminate {}: {message}",
                channel.display_name()
            ))));
            effects.push(Effect::Notify(Notice::KillFailed));
            effects.extend(finish(state, Outcome::Failed));
            return effects;
        }
        StepResult::Noop => {
            effects.push(Effect::Log(LogLine::info(format!(
                "{} is not running",
                channel.display_name()
            ))));
        }
        StepResult::Success => {}
    }

    if let Some(next) = state.complete_item() {
        effects.push(Effect::TerminateProcesses { channel: next });
        return effects;
    }

    state.set_progress(KILL_PROGRESS);
    effects.push(Effect::Log(LogLine::success("Discord Killed")));
    effects.extend(pause_before(state, Phase::DeletingShims));
    effects
}

fn pause_before(state: &mut RepairState, phase: Phase) -> Vec<Effect> {
    state.enter(phase);
    state.set_awaiting_pause(true);
    vec![Effect::Pause]
}

fn on_pause_elapsed(state: &mut RepairState) -> Vec<Effect> {
    match state.phase() {
        Phase::DeletingShims => {
            state.queue_channels(DELETE_SHIM_DIRS_PROGRESS);
            let mut effects = vec![Effect::Log(LogLine::paragraph("Deleting shims..."))];
            if let Some(channel) = state.current_item() {
                effects.extend(erase_shim(state, channel));
            }
            effects
        }
        Phase::DeletingModules => {
            state.queue_channels(DELETE_MODULE_DIRS_PROGRESS);
            let mut effects = vec![Effect::Log(LogLine::paragraph(
                "Deleting discord modules...",
            ))];
            if let Some(channel) = state.current_item() {
                effects.extend(erase_modules(channel));
            }
            effects
        }
        _ => Vec::new(),
    }
}

fn shim_path(state: &RepairState, channel: Channel) -> PathBuf {
    state
        .root_of(channel)
        .map(|root| root.join(SHIM_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(SHIM_DIR_NAME))
}

fn erase_shim(state: &RepairState, channel: Channel) -> Vec<Effect> {
    let root = state
        .root_of(channel)
        .map(|root| root.display().to_string())
        .unwrap_or_default();
    vec![
        Effect::Log(LogLine::info(format!("Removing {root}"))),
        Effect::EraseShim {
            channel,
            path: shim_path(state, channel),
        },
    ]
}

fn erase_modules(channel: Channel) -> Vec<Effect> {
    vec![
        Effect::Log(LogLine::info(format!(
            "Removing modules of {}",
            channel.display_name()
        ))),
        Effect::EraseModules { channel },
    ]
}

fn on_shim_erased(state: &mut RepairState, channel: Channel, result: StepResult) -> Vec<Effect> {
    let path = shim_path(state, channel);
    let mut effects = Vec::new();
    match result {
        StepResult::Failed(message) => {
            effects.push(Effect::Log(LogLine::failure(format!(
                "Could not delete folder {}",
                path.display()
            ))));
            effects.push(Effect::Log(LogLine::failure(message)));
            effects.extend(finish(state, Outcome::Failed));
            return effects;
        }
        StepResult::Noop => {
            effects.push(Effect::Log(LogLine::info(format!(
                "{} not present, skipping",
                path.display()
            ))));
        }
        StepResult::Success => {}
    }
    effects.push(Effect::Log(LogLine::success("Deletion successful")));

    if let Some(next) = state.complete_item() {
        effects.extend(erase_shim(state, next));
        return effects;
    }

    state.set_progress(DELETE_SHIM_DIRS_PROGRESS);
    effects.push(Effect::Log(LogLine::success("Shims deleted")));

    let skip_modules = state
        .request()
        .map(|r| r.platform.skips_module_cleanup())
        .unwrap_or(false);
    if skip_modules {
        state.set_progress(DELETE_MODULE_DIRS_PROGRESS);
        effects.extend(ask_plugin_removal(state));
    } else {
        effects.extend(pause_before(state, Phase::DeletingModules));
    }
    effects
}

fn on_modules_erased(state: &mut RepairState, channel: Channel, result: StepResult) -> Vec<Effect> {
    let mut effects = Vec::new();
    match result {
        StepResult::Failed(message) => {
            effects.push(Effect::Log(LogLine::failure(format!(
                "Could not delete modules of {}",
                channel.display_name()
            ))));
            effects.push(Effect::Log(LogLine::failure(message)));
            effects.extend(finish(state, Outcome::Failed));
            return effects;
        }
        StepResult::Noop => {
            effects.push(Effect::Log(LogLine::info(format!(
                "No modules folder for {}, skipping",
                channel.display_name()
            ))));
        }
        StepResult::Success => {}
    }
    effects.push(Effect::Log(LogLine::success("Deletion successful")));

    if let Some(next) = state.complete_item() {
        effects.extend(erase_modules(next));
        return effects;
    }

    state.set_progress(DELETE_MODULE_DIRS_PROGRESS);
    effects.push(Effect::Log(LogLine::success("Modules deleted")));
    effects.extend(ask_plugin_removal(state));
    effects
}

fn ask_plugin_removal(state: &mut RepairState) -> Vec<Effect> {
    state.enter(Phase::ConfirmingPluginRemoval);
    let plugins_dir = state.plugins_dir().map(PathBuf::from).unwrap_or_default();
    vec![Effect::Confirm(Prompt::RemovePlugins { plugins_dir })]
}

fn start_plugin_removal(state: &mut RepairState) -> Vec<Effect> {
    // Plugin removal owns its own progress lifecycle, also inside a repair.
    state.reset_progress();
    state.enter(Phase::RemovingPlugins);
    let path = state.plugins_dir().map(PathBuf::from).unwrap_or_default();
    vec![
        Effect::Log(LogLine::paragraph("Removing plugins folder...")),
        Effect::RemovePlugins { path },
    ]
}

fn on_plugins_removed(state: &mut RepairState, result: StepResult) -> Vec<Effect> {
    let mut effects = Vec::new();
    match result {
        StepResult::Failed(message) => {
            let path = state.plugins_dir().map(PathBuf::from).unwrap_or_default();
            effects.push(Effect::Log(LogLine::failure(format!(
                "Failed to remove directory: {}",
                path.display()
            ))));
            effects.push(Effect::Log(LogLine::failure(message)));
            effects.extend(finish(state, Outcome::Failed));
            return effects;
        }
        StepResult::Noop => {
            effects.push(Effect::Log(LogLine::warning("Plugins folder does not exist.")));
        }
        StepResult::Success => {
            effects.push(Effect::Log(LogLine::success("Plugins folder cleared")));
        }
    }
    state.set_progress(PLUGIN_REMOVAL_PROGRESS);

    match state.workflow() {
        Some(Workflow::Repair) => effects.extend(ask_reinstall(state)),
        _ => effects.extend(finish(state, Outcome::Succeeded)),
    }
    effects
}

fn ask_reinstall(state: &mut RepairState) -> Vec<Effect> {
    state.enter(Phase::ConfirmingReinstall);
    vec![Effect::Confirm(Prompt::Reinstall)]
}

fn start_reinstall(state: &mut RepairState) -> Vec<Effect> {
    let Some(config) = state.request().map(|r| r.config.clone()) else {
        return finish(state, Outcome::Failed);
    };
    state.reset_progress();
    state.enter(Phase::Reinstalling);
    vec![
        Effect::Log(LogLine::paragraph("Reinstalling BetterDiscord...")),
        Effect::Reinstall { config },
    ]
}

fn on_reinstall_finished(state: &mut RepairState, result: StepResult) -> Vec<Effect> {
    if let StepResult::Failed(message) = result {
        let mut effects = vec![
            Effect::Log(LogLine::failure("Reinstall failed")),
            Effect::Log(LogLine::failure(message)),
        ];
        effects.extend(finish(state, Outcome::Failed));
        return effects;
    }

    state.set_progress(REINSTALL_PROGRESS);
    let mut effects = vec![
        Effect::Log(LogLine::success("Reinstall complete")),
        Effect::Notify(Notice::RelaunchManually),
    ];
    effects.extend(finish(state, Outcome::Succeeded));
    effects
}

fn finish(state: &mut RepairState, outcome: Outcome) -> Vec<Effect> {
    state.finish(outcome);
    vec![Effect::Finished(outcome)]
}
