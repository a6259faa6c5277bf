use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use repair_core::{
    update, Channel, ChannelConfig, Confirmation, Effect, LogLine, Msg, Notice, Outcome, Phase,
    Platform, Prompt, RepairRequest, RepairState, RepairViewModel, StepResult, Workflow,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(repair_logging::initialize_for_tests);
}

fn plugins_dir() -> PathBuf {
    PathBuf::from("/appdata/BetterDiscord/plugins")
}

fn request(config: ChannelConfig, platform: Platform) -> RepairRequest {
    RepairRequest {
        config,
        platform,
        plugins_dir: plugins_dir(),
    }
}

fn three_channels() -> ChannelConfig {
    ChannelConfig::new()
        .with(Channel::Stable, "/data/stable")
        .with(Channel::Ptb, "/data/ptb")
        .with(Channel::Canary, "/data/canary")
}

fn has_effect(effects: &[Effect], pred: impl Fn(&Effect) -> bool) -> bool {
    effects.iter().any(pred)
}

/// Kills every configured channel successfully and lets the pause elapse.
fn through_kill(state: RepairState, config: &ChannelConfig) -> RepairState {
    let mut state = state;
    for channel in config.channels() {
        let (next, _) = update(
            state,
            Msg::ProcessesTerminated {
                channel,
                result: StepResult::Success,
            },
        );
        state = next;
    }
    let (state, _) = update(state, Msg::PauseElapsed);
    state
}

fn through_shims(state: RepairState, config: &ChannelConfig) -> (RepairState, Vec<Effect>) {
    let mut state = state;
    let mut last = Vec::new();
    for channel in config.channels() {
        let (next, effects) = update(
            state,
            Msg::ShimErased {
                channel,
                result: StepResult::Success,
            },
        );
        state = next;
        last = effects;
    }
    (state, last)
}

#[test]
fn kill_phase_reaches_milestone_for_any_channel_count() {
    init_logging();
    for count in 1..=3 {
        let config: ChannelConfig = Channel::ALL
            .iter()
            .take(count)
            .map(|c| (*c, PathBuf::from(format!("/data/{c}"))))
            .collect();
        let (mut state, effects) = update(
            RepairState::new(),
            Msg::RepairRequested(request(config.clone(), Platform::Windows)),
        );
        assert_eq!(
            effects,
            vec![
                Effect::Log(LogLine::paragraph("Killing Discord...")),
                Effect::TerminateProcesses {
                    channel: Channel::Stable
                },
            ]
        );

        let mut last = Vec::new();
        for channel in config.channels() {
            let before = state.progress().value();
            let (next, effects) = update(
                state,
                Msg::ProcessesTerminated {
                    channel,
                    result: StepResult::Success,
                },
            );
            assert!(next.progress().value() >= before);
            state = next;
            last = effects;
        }

        assert_eq!(state.progress().value(), 20.0);
        assert_eq!(state.phase(), Phase::DeletingShims);
        assert_eq!(last.last(), Some(&Effect::Pause));
    }
}

#[test]
fn kill_failure_prevents_any_deletion() {
    init_logging();
    let config = three_channels();
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config, Platform::Windows)),
    );
    let (state, _) = update(
        state,
        Msg::ProcessesTerminated {
            channel: Channel::Stable,
            result: StepResult::Success,
        },
    );
    let (state, effects) = update(
        state,
        Msg::ProcessesTerminated {
            channel: Channel::Ptb,
            result: StepResult::Failed("access denied".to_string()),
        },
    );

    assert!(has_effect(&effects, |e| *e == Effect::Notify(Notice::KillFailed)));
    assert_eq!(effects.last(), Some(&Effect::Finished(Outcome::Failed)));
    assert!(!has_effect(&effects, |e| matches!(
        e,
        Effect::EraseShim { .. } | Effect::EraseModules { .. } | Effect::Pause
    )));
    assert_eq!(state.phase(), Phase::Failed);

    // A late result for the remaining channel cannot revive the run.
    let (state, effects) = update(
        state,
        Msg::ProcessesTerminated {
            channel: Channel::Canary,
            result: StepResult::Success,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.outcome(), Some(Outcome::Failed));
}

#[test]
fn single_channel_scenario_on_linux_declines_everything() {
    init_logging();
    let config = ChannelConfig::new().with(Channel::Stable, "/data/stable");
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::Linux)),
    );
    let (state, _) = update(
        state,
        Msg::ProcessesTerminated {
            channel: Channel::Stable,
            result: StepResult::Noop,
        },
    );
    assert_eq!(state.progress().value(), 20.0);

    let (state, effects) = update(state, Msg::PauseElapsed);
    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::paragraph("Deleting shims...")),
            Effect::Log(LogLine::info("Removing /data/stable")),
            Effect::EraseShim {
                channel: Channel::Stable,
                path: PathBuf::from("/data/stable").join("app"),
            },
        ]
    );

    let (state, effects) = update(
        state,
        Msg::ShimErased {
            channel: Channel::Stable,
            result: StepResult::Success,
        },
    );
    // Module phase is skipped on Linux but the milestone is still reached.
    assert_eq!(state.progress().value(), 100.0);
    assert!(!has_effect(&effects, |e| matches!(
        e,
        Effect::EraseModules { .. } | Effect::Pause
    )));
    assert_eq!(
        effects.last(),
        Some(&Effect::Confirm(Prompt::RemovePlugins {
            plugins_dir: plugins_dir()
        }))
    );

    let (state, effects) = update(state, Msg::PluginPromptAnswered(Confirmation::No));
    assert_eq!(effects, vec![Effect::Confirm(Prompt::Reinstall)]);
    assert_eq!(state.progress().value(), 100.0);

    let (state, effects) = update(state, Msg::ReinstallPromptAnswered(Confirmation::No));
    assert_eq!(effects, vec![Effect::Finished(Outcome::Succeeded)]);
    assert_eq!(state.phase(), Phase::Done);
}

#[test]
fn module_phase_runs_per_channel_off_linux() {
    init_logging();
    let config = three_channels();
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::MacOs)),
    );
    let state = through_kill(state, &config);
    let (state, effects) = through_shims(state, &config);

    assert_eq!(state.progress().value(), 50.0);
    assert_eq!(state.phase(), Phase::DeletingModules);
    assert_eq!(effects.last(), Some(&Effect::Pause));

    // Results before the pause has elapsed are not accepted.
    let (state, effects) = update(
        state,
        Msg::ModulesErased {
            channel: Channel::Stable,
            result: StepResult::Success,
        },
    );
    assert!(effects.is_empty());

    let (mut state, effects) = update(state, Msg::PauseElapsed);
    assert!(has_effect(&effects, |e| *e
        == Effect::EraseModules {
            channel: Channel::Stable
        }));

    for channel in config.channels() {
        let (next, _) = update(
            state,
            Msg::ModulesErased {
                channel,
                result: StepResult::Noop,
            },
        );
        assert!(next.progress().value() > 50.0);
        state = next;
    }
    assert_eq!(state.progress().value(), 100.0);
    assert_eq!(state.phase(), Phase::ConfirmingPluginRemoval);
}

#[test]
fn shim_failure_stops_before_modules_and_prompts() {
    init_logging();
    let config = three_channels();
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::Windows)),
    );
    let state = through_kill(state, &config);
    let (state, effects) = update(
        state,
        Msg::ShimErased {
            channel: Channel::Stable,
            result: StepResult::Failed("permission denied".to_string()),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::failure(format!(
                "Could not delete folder {}",
                PathBuf::from("/data/stable").join("app").display()
            ))),
            Effect::Log(LogLine::failure("permission denied")),
            Effect::Finished(Outcome::Failed),
        ]
    );
    assert_eq!(state.phase(), Phase::Failed);

    let (_, effects) = update(state, Msg::PluginPromptAnswered(Confirmation::Yes));
    assert!(effects.is_empty());
}

#[test]
fn module_resolution_failure_fails_run() {
    init_logging();
    let config = ChannelConfig::new().with(Channel::Canary, "/data/canary");
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::Windows)),
    );
    let state = through_kill(state, &config);
    let (state, _) = through_shims(state, &config);
    let (state, _) = update(state, Msg::PauseElapsed);
    let (state, effects) = update(
        state,
        Msg::ModulesErased {
            channel: Channel::Canary,
            result: StepResult::Failed("no versioned directory".to_string()),
        },
    );

    assert_eq!(state.phase(), Phase::Failed);
    assert!(!has_effect(&effects, |e| matches!(e, Effect::Confirm(_))));
}

#[test]
fn accepted_plugin_removal_resets_progress_then_prompts_reinstall() {
    init_logging();
    let config = ChannelConfig::new().with(Channel::Stable, "/data/stable");
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::Linux)),
    );
    let state = through_kill(state, &config);
    let (state, _) = through_shims(state, &config);

    let (state, effects) = update(state, Msg::PluginPromptAnswered(Confirmation::Yes));
    assert_eq!(state.progress().value(), 0.0);
    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::paragraph("Removing plugins folder...")),
            Effect::RemovePlugins {
                path: plugins_dir()
            },
        ]
    );

    let (state, effects) = update(state, Msg::PluginsRemoved(StepResult::Success));
    assert_eq!(state.progress().value(), 100.0);
    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::success("Plugins folder cleared")),
            Effect::Confirm(Prompt::Reinstall),
        ]
    );
}

#[test]
fn plugin_removal_error_skips_reinstall_prompt() {
    init_logging();
    let config = ChannelConfig::new().with(Channel::Stable, "/data/stable");
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::Linux)),
    );
    let state = through_kill(state, &config);
    let (state, _) = through_shims(state, &config);
    let (state, _) = update(state, Msg::PluginPromptAnswered(Confirmation::Yes));
    let (state, effects) = update(
        state,
        Msg::PluginsRemoved(StepResult::Failed("busy".to_string())),
    );

    assert_eq!(state.phase(), Phase::Failed);
    assert!(!has_effect(&effects, |e| matches!(e, Effect::Confirm(_))));
}

#[test]
fn accepted_reinstall_runs_installer_and_asks_for_relaunch() {
    init_logging();
    let config = ChannelConfig::new().with(Channel::Stable, "/data/stable");
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(config.clone(), Platform::Linux)),
    );
    let state = through_kill(state, &config);
    let (state, _) = through_shims(state, &config);
    let (state, _) = update(state, Msg::PluginPromptAnswered(Confirmation::No));

    let (state, effects) = update(state, Msg::ReinstallPromptAnswered(Confirmation::Yes));
    assert_eq!(state.phase(), Phase::Reinstalling);
    assert_eq!(state.progress().value(), 0.0);
    assert!(has_effect(&effects, |e| *e
        == Effect::Reinstall {
            config: config.clone()
        }));

    let (state, effects) = update(state, Msg::ReinstallFinished(StepResult::Success));
    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::success("Reinstall complete")),
            Effect::Notify(Notice::RelaunchManually),
            Effect::Finished(Outcome::Succeeded),
        ]
    );
    assert_eq!(state.phase(), Phase::Done);
    assert_eq!(state.progress().value(), 100.0);
}

#[test]
fn invalid_config_fails_before_any_destructive_effect() {
    init_logging();
    let (state, effects) = update(
        RepairState::new(),
        Msg::RepairRequested(request(ChannelConfig::new(), Platform::Windows)),
    );

    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::failure(
                "Invalid configuration: no channels configured"
            )),
            Effect::Finished(Outcome::Failed),
        ]
    );
    assert_eq!(state.phase(), Phase::Failed);
}

#[test]
fn standalone_plugin_removal_treats_missing_folder_as_success() {
    init_logging();
    let (state, effects) = update(
        RepairState::new(),
        Msg::PluginRemovalRequested {
            plugins_dir: plugins_dir(),
        },
    );
    assert_eq!(state.phase(), Phase::RemovingPlugins);
    assert!(has_effect(&effects, |e| *e
        == Effect::RemovePlugins {
            path: plugins_dir()
        }));

    let (state, effects) = update(state, Msg::PluginsRemoved(StepResult::Noop));
    assert_eq!(
        effects,
        vec![
            Effect::Log(LogLine::warning("Plugins folder does not exist.")),
            Effect::Finished(Outcome::Succeeded),
        ]
    );
    assert_eq!(state.progress().value(), 100.0);
}

#[test]
fn requests_are_ignored_while_a_run_is_active() {
    init_logging();
    let (state, _) = update(
        RepairState::new(),
        Msg::RepairRequested(request(three_channels(), Platform::Windows)),
    );
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::PluginRemovalRequested {
            plugins_dir: plugins_dir(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn finished_run_can_be_started_again_with_fresh_progress() {
    init_logging();
    let config = ChannelConfig::new().with(Channel::Stable, "/data/stable");
    let (state, _) = update(
        RepairState::new(),
        Msg::PluginRemovalRequested {
            plugins_dir: plugins_dir(),
        },
    );
    let (state, _) = update(state, Msg::PluginsRemoved(StepResult::Success));
    assert_eq!(state.progress().value(), 100.0);

    let (mut state, _) = update(
        state,
        Msg::RepairRequested(request(config, Platform::Windows)),
    );
    assert_eq!(state.progress().value(), 0.0);
    assert_eq!(state.phase(), Phase::KillingProcesses);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn view_reports_workflow_phase_and_progress() {
    let (state, _) = update(
        RepairState::new(),
        Msg::PluginRemovalRequested {
            plugins_dir: plugins_dir(),
        },
    );
    assert_eq!(
        state.view(),
        RepairViewModel {
            workflow: Some(Workflow::PluginRemoval),
            phase: Phase::RemovingPlugins,
            progress: 0.0,
            percent: 0,
            outcome: None,
        }
    );

    let (state, _) = update(state, Msg::PluginsRemoved(StepResult::Noop));
    let view = state.view();
    assert_eq!(view.percent, 100);
    assert_eq!(view.outcome, Some(Outcome::Succeeded));
}
