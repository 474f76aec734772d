use crate::features::export::format::ImageFormat;
use crate::shared::error::ExportError;
use log::debug;
use resvg::usvg::fontdb;
use resvg::{tiny_skia, usvg};
use std::io::Cursor;

/// Bundled so that labels render the same on hosts without system fonts.
const CHART_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
const CHART_FONT_FAMILY: &str = "DejaVu Sans";

/// SVG parsing options whose generic families resolve to the bundled face.
fn svg_options() -> Result<usvg::Options<'static>, ExportError> {
    let mut options = usvg::Options::default();
    let fonts = options.fontdb_mut();
    fonts.load_font_data(CHART_FONT.to_vec());
    fonts.set_sans_serif_family(CHART_FONT_FAMILY);
    fonts.set_serif_family(CHART_FONT_FAMILY);

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..Default::default()
    };
    if options.fontdb.query(&query).is_none() {
        return Err(ExportError::Encode(
            "no font available to draw the chart labels".to_string(),
        ));
    }
    Ok(options)
}

/// Rasterizes an SVG document to `width` x `height` pixels and encodes it.
pub(crate) fn rasterize(
    svg: &str,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> Result<Vec<u8>, ExportError> {
    let image_format = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Tiff => image::ImageFormat::Tiff,
        other => {
            return Err(ExportError::Encode(format!("{} is not a raster format", other)));
        }
    };

    let options = svg_options()?;
    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|e| ExportError::Encode(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        ExportError::Encode(format!("cannot allocate a {}x{} image", width, height))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    debug!("Rasterized plot to {}x{} pixels", width, height);

    let rgba = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| ExportError::Encode("pixel buffer size mismatch".to_string()))?;
    // The page is opaque white, so dropping alpha loses nothing.
    let rgb = image::DynamicImage::ImageRgba8(rgba).into_rgb8();

    let mut bytes = Cursor::new(Vec::new());
    rgb.write_to(&mut bytes, image_format)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(bytes.into_inner())
}
