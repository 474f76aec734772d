use crate::shared::error::LaunchError;
use log::{debug, info, warn};
use std::io;
use std::process::{Command, ExitStatus};
use std::thread::{self, JoinHandle};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::sync::oneshot;

/// Starts a command to be sampled.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

/// A child started by [`ProcessLauncher`]. A dedicated thread owns the child
/// and waits on it, so it is reaped as soon as it exits.
#[derive(Debug)]
pub struct LaunchedProcess {
    pid: u32,
    waiter: JoinHandle<io::Result<ExitStatus>>,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `argv` and returns once the child has started; the child keeps
    /// running.
    pub fn spawn(&self, argv: &[String]) -> Result<LaunchedProcess, LaunchError> {
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
        let resolved = which::which(program).map_err(|source| LaunchError::NotFound {
            program: program.clone(),
            source,
        })?;
        debug!("Resolved {} to {}", program, resolved.display());

        let (pid_tx, pid_rx) = oneshot::channel::<io::Result<u32>>();
        let args = args.to_vec();
        let waiter = thread::Builder::new()
            .name(String::from("memplot-child"))
            .spawn(move || {
                let mut child = match Command::new(&resolved).args(&args).spawn() {
                    Ok(child) => child,
                    Err(e) => {
                        let kind = e.kind();
                        let _ = pid_tx.send(Err(e));
                        return Err(io::Error::from(kind));
                    }
                };
                let _ = pid_tx.send(Ok(child.id()));
                child.wait()
            })
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        let pid = pid_rx
            .blocking_recv()
            .map_err(|_| LaunchError::HandoffDropped)?
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        info!("Started '{}' as PID {}", argv.join(" "), pid);
        Ok(LaunchedProcess { pid, waiter })
    }
}

impl LaunchedProcess {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn has_exited(&self) -> bool {
        self.waiter.is_finished()
    }

    /// Kills the child unless it has already exited. Until the waiter reaps
    /// it, the pid still names our child.
    pub fn kill(&self) -> Result<(), LaunchError> {
        if self.has_exited() {
            return Ok(());
        }

        let pid = Pid::from_u32(self.pid);
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing(),
        );
        let killed = sys.process(pid).map_or(false, |process| process.kill());

        if killed || self.has_exited() {
            debug!("Sent kill to child {}", self.pid);
            Ok(())
        } else {
            Err(LaunchError::Kill(self.pid))
        }
    }

    /// Blocks until the child exits.
    pub fn wait(self) -> Result<ExitStatus, LaunchError> {
        let status = self
            .waiter
            .join()
            .map_err(|_| LaunchError::WaiterPanicked)?
            .map_err(|source| LaunchError::Spawn {
                program: format!("PID {}", self.pid),
                source,
            })?;

        if status.success() {
            debug!("Child {} exited with {}", self.pid, status);
        } else {
            warn!("Child {} exited with {}", self.pid, status);
        }
        Ok(status)
    }
}
