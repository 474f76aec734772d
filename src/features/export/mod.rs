mod exporter;
mod format;
mod raster;
mod render;
mod vector;

pub use exporter::{export, Exporter};
pub use format::{ImageFormat, RASTER_DPI};
