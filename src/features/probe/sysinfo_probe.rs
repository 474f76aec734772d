use crate::features::probe::models::{MemoryProbe, MemoryReading, ProbeFailure};
use log::debug;
use sysinfo::{Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};

/// Memory probe backed by `sysinfo`. Only the sampled process is refreshed on
/// each read, and only its memory figures.
pub struct SysinfoProbe {
    sys: System,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl MemoryProbe for SysinfoProbe {
    fn memory_info(&mut self, pid: u32) -> Result<MemoryReading, ProbeFailure> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProbeFailure::Unavailable(
                "process memory is not available on this platform".to_string(),
            ));
        }

        let sys_pid = Pid::from_u32(pid);
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        match self.sys.process(sys_pid) {
            // An exited but unreaped child still has a process table entry.
            Some(process) if process.status() == ProcessStatus::Zombie => {
                debug!("Process {} is a zombie", pid);
                Err(ProbeFailure::NotFound(pid))
            }
            Some(process) => Ok(MemoryReading {
                resident_bytes: process.memory(),
                virtual_bytes: process.virtual_memory(),
            }),
            None => Err(ProbeFailure::NotFound(pid)),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}
