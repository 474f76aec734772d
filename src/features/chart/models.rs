use crate::features::sampling::SeriesPoint;
use crate::shared::config::Length;
use std::ops::Range;
use std::path::PathBuf;

/// What to draw and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub show_resident: bool,
    pub show_virtual: bool,
    pub width: Length,
    pub height: Length,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const BLACK: SeriesColor = SeriesColor { r: 0, g: 0, b: 0 };
    pub const BLUE: SeriesColor = SeriesColor { r: 0, g: 0, b: 255 };
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: SeriesColor,
    pub points: Vec<SeriesPoint>,
}

/// A line chart ready to be drawn by an exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    /// Plotting ranges: both axes start at zero, the y range leaves 5%
    /// headroom above the highest point.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (max_x, max_y) = points.fold((0f64, 0f64), |(mx, my), &(x, y)| (mx.max(x), my.max(y)));

        let max_x = if max_x > 0.0 { max_x } else { 1.0 };
        let max_y = if max_y > 0.0 { max_y * 1.05 } else { 1.0 };
        (0.0..max_x, 0.0..max_y)
    }
}
