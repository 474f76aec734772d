use crate::features::probe::MemoryReading;
use crate::shared::traits::Validatable;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A point of a derived series: seconds since the start of the run, and
/// kilobytes.
pub type SeriesPoint = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySample {
    pub elapsed: Duration,
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

impl MemorySample {
    pub fn new(elapsed: Duration, reading: MemoryReading) -> Self {
        Self {
            elapsed,
            resident_bytes: reading.resident_bytes,
            virtual_bytes: reading.virtual_bytes,
        }
    }
}

/// The samples gathered from one process during one run. Read-only once
/// built.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    subject_id: u32,
    started_at: DateTime<Utc>,
    sample_interval: Duration,
    samples: Vec<MemorySample>,
}

impl MemoryCollection {
    pub fn subject_id(&self) -> u32 {
        self.subject_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    pub fn samples(&self) -> &[MemorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// A line needs two points.
    pub fn is_renderable(&self) -> bool {
        self.samples.len() >= 2
    }

    /// Elapsed time of the last sample.
    pub fn span(&self) -> Duration {
        self.samples.last().map(|s| s.elapsed).unwrap_or_default()
    }

    pub fn peak_resident_bytes(&self) -> u64 {
        self.samples.iter().map(|s| s.resident_bytes).max().unwrap_or(0)
    }

    pub fn peak_virtual_bytes(&self) -> u64 {
        self.samples.iter().map(|s| s.virtual_bytes).max().unwrap_or(0)
    }

    pub fn resident_series(&self) -> Vec<SeriesPoint> {
        self.series(|s| s.resident_bytes)
    }

    pub fn virtual_series(&self) -> Vec<SeriesPoint> {
        self.series(|s| s.virtual_bytes)
    }

    fn series(&self, bytes: impl Fn(&MemorySample) -> u64) -> Vec<SeriesPoint> {
        self.samples
            .iter()
            .map(|s| (s.elapsed.as_secs_f64(), bytes(s) as f64 / 1024.0))
            .collect()
    }
}

impl Validatable for MemoryCollection {
    fn validate(&self) -> Result<(), String> {
        if self.sample_interval.is_zero() {
            return Err("Sample interval must be greater than zero".to_string());
        }
        if let Some(pair) = self
            .samples
            .windows(2)
            .find(|pair| pair[1].elapsed < pair[0].elapsed)
        {
            return Err(format!(
                "Samples out of order: {:?} follows {:?}",
                pair[1].elapsed, pair[0].elapsed
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCollectionBuilder {
    subject_id: Option<u32>,
    started_at: Option<DateTime<Utc>>,
    sample_interval: Option<Duration>,
    samples: Vec<MemorySample>,
}

impl MemoryCollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject_id(mut self, subject_id: u32) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn sample_interval(mut self, sample_interval: Duration) -> Self {
        self.sample_interval = Some(sample_interval);
        self
    }

    pub fn sample(mut self, sample: MemorySample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn samples(mut self, samples: impl IntoIterator<Item = MemorySample>) -> Self {
        self.samples.extend(samples);
        self
    }

    pub fn push(&mut self, sample: MemorySample) {
        self.samples.push(sample);
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn build(self) -> Result<MemoryCollection, String> {
        let collection = MemoryCollection {
            subject_id: self.subject_id.ok_or("subject_id is required")?,
            started_at: self.started_at.unwrap_or_else(Utc::now),
            sample_interval: self.sample_interval.ok_or("sample_interval is required")?,
            samples: self.samples,
        };

        collection.validate()?;
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ms: u64, resident: u64, virt: u64) -> MemorySample {
        MemorySample {
            elapsed: Duration::from_millis(ms),
            resident_bytes: resident,
            virtual_bytes: virt,
        }
    }

    #[test]
    fn series_are_in_seconds_and_kilobytes() {
        let collection = MemoryCollectionBuilder::new()
            .subject_id(1)
            .sample_interval(Duration::from_millis(500))
            .samples([sample(0, 2048, 4096), sample(500, 3072, 8192)])
            .build()
            .unwrap();

        assert_eq!(collection.resident_series(), vec![(0.0, 2.0), (0.5, 3.0)]);
        assert_eq!(collection.virtual_series(), vec![(0.0, 4.0), (0.5, 8.0)]);
        assert_eq!(collection.peak_resident_bytes(), 3072);
        assert_eq!(collection.peak_virtual_bytes(), 8192);
        assert_eq!(collection.span(), Duration::from_millis(500));
        assert!(collection.is_renderable());
    }

    #[test]
    fn rejects_out_of_order_samples() {
        let result = MemoryCollectionBuilder::new()
            .subject_id(1)
            .sample_interval(Duration::from_millis(10))
            .samples([sample(20, 1, 1), sample(10, 1, 1)])
            .build();
        assert!(result.unwrap_err().contains("out of order"));
    }

    #[test]
    fn equal_timestamps_are_allowed() {
        let collection = MemoryCollectionBuilder::new()
            .subject_id(1)
            .sample_interval(Duration::from_millis(10))
            .samples([sample(10, 1, 1), sample(10, 2, 2)])
            .build()
            .unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn requires_a_positive_interval_and_a_subject() {
        assert!(MemoryCollectionBuilder::new()
            .subject_id(1)
            .sample_interval(Duration::ZERO)
            .build()
            .is_err());
        assert!(MemoryCollectionBuilder::new()
            .sample_interval(Duration::from_millis(1))
            .build()
            .is_err());
    }

    #[test]
    fn a_single_sample_is_not_renderable() {
        let collection = MemoryCollectionBuilder::new()
            .subject_id(1)
            .sample_interval(Duration::from_millis(1))
            .sample(sample(0, 1, 1))
            .build()
            .unwrap();
        assert!(!collection.is_renderable());
        assert_eq!(collection.resident_series().len(), 1);
    }
}
