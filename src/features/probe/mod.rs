mod models;
mod sysinfo_probe;

pub use models::{MemoryProbe, MemoryReading, ProbeFailure};
pub use sysinfo_probe::SysinfoProbe;
