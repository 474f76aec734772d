mod builder;
mod models;

pub use builder::{build, MemoryChartBuilder, RESIDENT_LABEL, VIRTUAL_LABEL};
pub use models::{Chart, ChartSeries, RenderConfig, SeriesColor};
