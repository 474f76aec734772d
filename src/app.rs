//! One complete run: launch (optionally), sample, chart, save.

use crate::features::chart::MemoryChartBuilder;
use crate::features::export::Exporter;
use crate::features::launcher::{LaunchedProcess, ProcessLauncher};
use crate::features::probe::{MemoryProbe, SysinfoProbe};
use crate::features::sampling::MemorySampler;
use crate::shared::config::{RunConfig, Subject};
use crate::shared::error::MemplotError;
use crate::shared::traits::DataCollector;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug)]
pub struct RunReport {
    pub subject_id: u32,
    pub samples: usize,
    pub output: PathBuf,
    /// Exit status of the launched command, if one was launched.
    pub child_status: Option<ExitStatus>,
}

pub fn run(config: RunConfig) -> Result<RunReport, MemplotError> {
    run_with_probe(config, SysinfoProbe::new())
}

pub fn run_with_probe<P: MemoryProbe>(
    config: RunConfig,
    probe: P,
) -> Result<RunReport, MemplotError> {
    let (subject_id, child) = match &config.subject {
        Subject::Pid(pid) => (*pid, None),
        Subject::Command(argv) => {
            let launched = ProcessLauncher::new().spawn(argv)?;
            (launched.pid(), Some(launched))
        }
    };

    match sample_and_plot(&config, probe, subject_id) {
        Ok(samples) => {
            let child_status = match child {
                Some(child) => Some(wait_for(child)?),
                None => None,
            };
            Ok(RunReport {
                subject_id,
                samples,
                output: config.render.output_path,
                child_status,
            })
        }
        Err(e) => {
            if let Some(child) = child {
                stop(child);
            }
            Err(e)
        }
    }
}

fn sample_and_plot<P: MemoryProbe>(
    config: &RunConfig,
    probe: P,
    subject_id: u32,
) -> Result<usize, MemplotError> {
    info!("Collecting data from PID {} ...", subject_id);
    if config.total_duration.is_zero() {
        warn!("Sampling will continue until the program is no longer running");
    }

    let collection = MemorySampler::new(probe, subject_id, config.plan()).collect()?;
    info!(
        "Collected {} samples over {:.2}s (peak RSS {} KiB, peak VSZ {} KiB)",
        collection.len(),
        collection.span().as_secs_f64(),
        collection.peak_resident_bytes() / 1024,
        collection.peak_virtual_bytes() / 1024
    );

    info!("Generating plot...");
    let chart = MemoryChartBuilder::new().build(&collection, &config.render)?;

    info!(
        "Saving {} plot to {} ...",
        config.format,
        config.render.output_path.display()
    );
    Exporter::new().export(
        &chart,
        config.render.width,
        config.render.height,
        &config.render.output_path,
    )?;

    Ok(collection.len())
}

fn wait_for(child: LaunchedProcess) -> Result<ExitStatus, MemplotError> {
    if !child.has_exited() {
        info!("Waiting for PID {} to exit...", child.pid());
    }
    Ok(child.wait()?)
}

/// Ends a launched child after a failed run. The run's own error is what
/// gets reported, so problems here are only logged.
fn stop(child: LaunchedProcess) {
    let pid = child.pid();
    if !child.has_exited() {
        info!("Stopping launched process {}", pid);
        if let Err(e) = child.kill() {
            warn!("{}; leaving it running", e);
            return;
        }
    }
    match child.wait() {
        Ok(status) => debug!("Launched process {} ended with {}", pid, status),
        Err(e) => warn!("Could not reap launched process {}: {}", pid, e),
    }
}
