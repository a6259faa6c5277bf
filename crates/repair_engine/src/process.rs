use repair_core::Channel;
use repair_logging::{repair_debug, repair_info, repair_trace};
use sysinfo::{Pid, Process, ProcessStatus, ProcessesToUpdate, System};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminateError {
    #[error("{name} (pid {pid}) refused to terminate")]
    KillRejected { name: String, pid: u32 },
}

/// Stops running instances of the host application.
pub trait ProcessTerminator {
    /// Kills every process of `channel` and returns how many were signalled.
    /// Zero means nothing was running.
    fn terminate(&self, channel: Channel) -> Result<usize, TerminateError>;
}

/// Terminator backed by the OS process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoTerminator;

impl ProcessTerminator for SysinfoTerminator {
    fn terminate(&self, channel: Channel) -> Result<usize, TerminateError> {
        let mut system = System::new_all();

        // Linux lists threads as tasks of their own; only signal the processes.
        let targets: Vec<(Pid, String)> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .filter_map(|(pid, process)| {
                let name = process.name().to_string_lossy();
                process_matches(channel, &name).then(|| (*pid, name.into_owned()))
            })
            .collect();

        for (pid, name) in &targets {
            repair_debug!("Killing {} (pid {})", name, pid);
            let signalled = system.process(*pid).is_some_and(Process::kill);
            if !signalled && is_alive(&mut system, *pid) {
                return Err(TerminateError::KillRejected {
                    name: name.clone(),
                    pid: pid.as_u32(),
                });
            }
            if !signalled {
                repair_trace!("{} (pid {}) exited before the kill", name, pid);
            }
        }

        if !targets.is_empty() {
            repair_info!(
                "Terminated {} {} process(es)",
                targets.len(),
                channel.display_name()
            );
        }
        Ok(targets.len())
    }
}

fn is_alive(system: &mut System, pid: Pid) -> bool {
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system
        .process(pid)
        .is_some_and(|process| process.status() != ProcessStatus::Zombie)
}

/// Whether a process name belongs to `channel`.
///
/// Case and spaces are ignored and `.exe` is optional, so `DiscordPTB.exe`
/// and the macOS `Discord PTB` both match the PTB channel.
pub fn process_matches(channel: Channel, process_name: &str) -> bool {
    let normalized: String = process_name
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let stem = normalized.strip_suffix(".exe").unwrap_or(&normalized);
    stem == channel.process_stem()
}
