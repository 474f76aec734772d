use thiserror::Error;

/// Instantaneous memory footprint of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReading {
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("process {0} not found")]
    NotFound(u32),
    #[error("{0}")]
    Unavailable(String),
}

/// Reads the memory footprint of a process by pid.
///
/// `NotFound` must be reported once the process no longer exists; the
/// sampler relies on it to end open-ended runs.
pub trait MemoryProbe {
    fn memory_info(&mut self, pid: u32) -> Result<MemoryReading, ProbeFailure>;
}

impl<P: MemoryProbe + ?Sized> MemoryProbe for &mut P {
    fn memory_info(&mut self, pid: u32) -> Result<MemoryReading, ProbeFailure> {
        (**self).memory_info(pid)
    }
}

impl<P: MemoryProbe + ?Sized> MemoryProbe for Box<P> {
    fn memory_info(&mut self, pid: u32) -> Result<MemoryReading, ProbeFailure> {
        (**self).memory_info(pid)
    }
}
