use crate::features::chart::Chart;
use crate::features::export::format::{ImageFormat, RASTER_DPI};
use crate::features::export::raster::rasterize;
use crate::features::export::render::draw_chart;
use crate::features::export::vector::{Scene, VectorBackend};
use crate::shared::config::Length;
use crate::shared::error::ExportError;
use log::{debug, info};
use plotters::prelude::SVGBackend;
use std::io::Write;
use std::path::Path;

/// Writes charts to image files.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exporter;

impl Exporter {
    pub fn new() -> Self {
        Self
    }

    /// Renders `chart` at the given physical size into `path`, in the format
    /// named by its extension. The file only appears once it is complete.
    pub fn export(
        &self,
        chart: &Chart,
        width: Length,
        height: Length,
        path: &Path,
    ) -> Result<(), ExportError> {
        let format = ImageFormat::from_path(path)?;
        let bytes = self.encode(chart, format, width, height)?;
        write_atomically(path, &bytes)?;
        info!("Saved {} plot ({} bytes) to {}", format, bytes.len(), path.display());
        Ok(())
    }

    pub fn encode(
        &self,
        chart: &Chart,
        format: ImageFormat,
        width: Length,
        height: Length,
    ) -> Result<Vec<u8>, ExportError> {
        let canvas = (to_points(width), to_points(height));
        debug!(
            "Rendering {} at {}x{}pt ({} x {})",
            format, canvas.0, canvas.1, width, height
        );

        match format {
            ImageFormat::Svg => Ok(render_svg(chart, canvas)?.into_bytes()),
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Tiff => {
                let svg = render_svg(chart, canvas)?;
                rasterize(&svg, to_pixels(width), to_pixels(height), format)
            }
            ImageFormat::Eps | ImageFormat::Pdf | ImageFormat::Tex => {
                let mut scene = Scene::new(canvas.0, canvas.1);
                draw_chart(chart, VectorBackend::new(&mut scene))?;
                Ok(match format {
                    ImageFormat::Eps => scene.to_eps(),
                    ImageFormat::Pdf => scene.to_pdf(),
                    _ => scene.to_tikz(),
                })
            }
        }
    }
}

/// Saves `chart` to `path`; see [`Exporter::export`].
pub fn export(chart: &Chart, width: Length, height: Length, path: &Path) -> Result<(), ExportError> {
    Exporter::new().export(chart, width, height, path)
}

fn render_svg(chart: &Chart, canvas: (u32, u32)) -> Result<String, ExportError> {
    let mut svg = String::new();
    draw_chart(chart, SVGBackend::with_string(&mut svg, canvas))?;
    Ok(svg)
}

fn to_points(length: Length) -> u32 {
    (length.points().round() as u32).max(1)
}

fn to_pixels(length: Length) -> u32 {
    ((length.inches() * RASTER_DPI).round() as u32).max(1)
}

/// Writes into a temporary file next to `path` and renames it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".memplot-")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}
