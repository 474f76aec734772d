pub mod app;
pub mod cli;
pub mod features;
pub mod logging;
pub mod shared;

// Re-export commonly used items from features
pub use features::chart::{Chart, ChartSeries, MemoryChartBuilder, RenderConfig, SeriesColor};
pub use features::export::{Exporter, ImageFormat};
pub use features::launcher::{LaunchedProcess, ProcessLauncher};
pub use features::probe::{MemoryProbe, MemoryReading, ProbeFailure, SysinfoProbe};
pub use features::sampling::{
    MemoryCollection,
    MemoryCollectionBuilder,
    MemorySample,
    MemorySampler,
    SamplingPlan,
};

// Re-export shared functionality
pub use shared::config::{Length, LengthUnit, RunConfig, Settings, Subject};
pub use shared::error::{
    CollectionError,
    ConfigurationError,
    ExportError,
    LaunchError,
    MemplotError,
    RenderError,
};
pub use shared::traits::{DataCollector, Validatable};

pub use app::{run, run_with_probe, RunReport};
