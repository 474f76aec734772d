pub mod collector;
pub mod models;

pub use collector::{run, MemorySampler, SamplingPlan};
pub use models::{MemoryCollection, MemoryCollectionBuilder, MemorySample, SeriesPoint};
