use crate::features::chart::models::{Chart, ChartSeries, RenderConfig, SeriesColor};
use crate::features::sampling::{MemoryCollection, SeriesPoint};
use crate::shared::error::RenderError;
use log::debug;

pub const RESIDENT_LABEL: &str = "RSS";
pub const VIRTUAL_LABEL: &str = "VSZ";

/// Turns a [`MemoryCollection`] into a [`Chart`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryChartBuilder;

impl MemoryChartBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        collection: &MemoryCollection,
        config: &RenderConfig,
    ) -> Result<Chart, RenderError> {
        if !collection.is_renderable() {
            return Err(RenderError::TooFewSamples(collection.len()));
        }

        let mut chart = Chart {
            title: format!("Memory Plot of PID {}", collection.subject_id()),
            x_label: String::from("Time (Seconds)"),
            y_label: String::from("KiloBytes"),
            grid: true,
            series: Vec::new(),
        };

        if config.show_resident {
            chart.series.push(line(
                RESIDENT_LABEL,
                SeriesColor::BLACK,
                collection.resident_series(),
            )?);
        }

        if config.show_virtual {
            chart.series.push(line(
                VIRTUAL_LABEL,
                SeriesColor::BLUE,
                collection.virtual_series(),
            )?);
        }

        debug!(
            "Built chart '{}' with {} series",
            chart.title,
            chart.series.len()
        );
        Ok(chart)
    }
}

fn line(label: &str, color: SeriesColor, points: Vec<SeriesPoint>) -> Result<ChartSeries, RenderError> {
    if let Some((x, y)) = points
        .iter()
        .find(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(RenderError::InvalidSeries {
            label: label.to_string(),
            reason: format!("point ({}, {}) is not finite", x, y),
        });
    }

    Ok(ChartSeries {
        label: label.to_string(),
        color,
        points,
    })
}

/// Builds the chart for `collection` as configured.
pub fn build(collection: &MemoryCollection, config: &RenderConfig) -> Result<Chart, RenderError> {
    MemoryChartBuilder::new().build(collection, config)
}
