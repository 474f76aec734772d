use crate::features::probe::{MemoryProbe, ProbeFailure};
use crate::features::sampling::models::{MemoryCollection, MemoryCollectionBuilder, MemorySample};
use crate::shared::error::{CollectionError, ConfigurationError};
use crate::shared::traits::DataCollector;
use chrono::Utc;
use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant};

/// How often and for how long to sample. A zero `total` samples until the
/// process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub interval: Duration,
    pub total: Duration,
}

impl SamplingPlan {
    pub fn new(interval: Duration, total: Duration) -> Self {
        Self { interval, total }
    }

    pub fn open_ended(interval: Duration) -> Self {
        Self::new(interval, Duration::ZERO)
    }

    pub fn is_open_ended(&self) -> bool {
        self.total.is_zero()
    }

    pub fn check(&self) -> Result<(), ConfigurationError> {
        if self.interval.is_zero() {
            return Err(ConfigurationError::InvalidInterval);
        }
        if !self.is_open_ended() && self.total.as_nanos() / self.interval.as_nanos() < 2 {
            return Err(ConfigurationError::TooFewSamples {
                interval: self.interval,
                total: self.total,
            });
        }
        Ok(())
    }
}

/// Polls a [`MemoryProbe`] at a fixed interval and gathers the readings of a
/// single process.
pub struct MemorySampler<P> {
    probe: P,
    subject_id: u32,
    plan: SamplingPlan,
}

impl<P: MemoryProbe> MemorySampler<P> {
    pub fn new(probe: P, subject_id: u32, plan: SamplingPlan) -> Self {
        Self {
            probe,
            subject_id,
            plan,
        }
    }

    pub fn into_probe(self) -> P {
        self.probe
    }

    fn collect_samples(&mut self) -> Result<MemoryCollection, CollectionError> {
        self.plan.check()?;

        let pid = self.subject_id;
        let start = Instant::now();
        let mut builder = MemoryCollectionBuilder::new()
            .subject_id(pid)
            .started_at(Utc::now())
            .sample_interval(self.plan.interval);

        loop {
            let elapsed = start.elapsed();
            match self.probe.memory_info(pid) {
                Ok(reading) => builder.push(MemorySample::new(elapsed, reading)),
                Err(ProbeFailure::NotFound(_)) if builder.sample_count() == 0 => {
                    return Err(CollectionError::SubjectNotFound(pid));
                }
                Err(ProbeFailure::NotFound(_)) if self.plan.is_open_ended() => {
                    info!("Process {} is no longer running after {:?}", pid, elapsed);
                    break;
                }
                Err(ProbeFailure::NotFound(_)) => {
                    return Err(CollectionError::SubjectExited { pid, elapsed });
                }
                Err(ProbeFailure::Unavailable(reason)) => {
                    return Err(CollectionError::Probe { pid, reason });
                }
            }

            // The bound is checked after sleeping, against the elapsed time
            // of the sample just taken, so the last sample lands at or past
            // `total`.
            thread::sleep(self.plan.interval);
            if !self.plan.is_open_ended() && elapsed > self.plan.total {
                break;
            }
        }

        let collection = builder.build().map_err(CollectionError::InvalidCollection)?;
        debug!(
            "Collected {} samples from process {} over {:?}",
            collection.len(),
            pid,
            collection.span()
        );
        Ok(collection)
    }
}

impl<P: MemoryProbe> DataCollector<MemoryCollection> for MemorySampler<P> {
    fn collect(&mut self) -> Result<MemoryCollection, CollectionError> {
        self.collect_samples()
    }

    fn validate(&self) -> Result<(), CollectionError> {
        Ok(self.plan.check()?)
    }

    fn health_check(&mut self) -> bool {
        self.plan.check().is_ok() && self.probe.memory_info(self.subject_id).is_ok()
    }
}

/// Samples `subject_id` every `interval` for `total` (zero: until it exits).
pub fn run<P: MemoryProbe>(
    probe: P,
    subject_id: u32,
    interval: Duration,
    total: Duration,
) -> Result<MemoryCollection, CollectionError> {
    MemorySampler::new(probe, subject_id, SamplingPlan::new(interval, total)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::probe::MemoryReading;

    struct CountingProbe {
        calls: usize,
    }

    impl MemoryProbe for CountingProbe {
        fn memory_info(&mut self, _pid: u32) -> Result<MemoryReading, ProbeFailure> {
            self.calls += 1;
            Ok(MemoryReading {
                resident_bytes: 1,
                virtual_bytes: 1,
            })
        }
    }

    #[test]
    fn plan_requires_two_samples() {
        let ms = Duration::from_millis;
        assert!(SamplingPlan::new(ms(10), ms(20)).check().is_ok());
        assert!(SamplingPlan::new(ms(10), ms(19)).check().is_err());
        assert!(SamplingPlan::open_ended(ms(10)).check().is_ok());
        assert!(matches!(
            SamplingPlan::new(Duration::ZERO, ms(10)).check(),
            Err(ConfigurationError::InvalidInterval)
        ));
    }

    #[test]
    fn rejected_plan_never_touches_the_probe() {
        let mut sampler = MemorySampler::new(
            CountingProbe { calls: 0 },
            1,
            SamplingPlan::new(Duration::from_secs(1), Duration::from_millis(1999)),
        );
        assert!(matches!(
            sampler.collect(),
            Err(CollectionError::Configuration(ConfigurationError::TooFewSamples { .. }))
        ));
        assert_eq!(sampler.into_probe().calls, 0);
    }

    #[test]
    fn health_check_probes_the_subject() {
        let mut sampler = MemorySampler::new(
            CountingProbe { calls: 0 },
            1,
            SamplingPlan::open_ended(Duration::from_millis(1)),
        );
        assert!(sampler.health_check());
        assert_eq!(sampler.into_probe().calls, 1);
    }
}
