use crate::shared::error::ConfigurationError;
use std::fmt;
use std::path::Path;

/// Output formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Eps,
    Jpeg,
    Pdf,
    Png,
    Svg,
    Tex,
    Tiff,
}

impl ImageFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 9] = [
        "eps", "jpg", "jpeg", "pdf", "png", "svg", "tex", "tif", "tiff",
    ];

    pub fn from_extension(extension: &str) -> Result<Self, ConfigurationError> {
        match extension.to_ascii_lowercase().as_str() {
            "eps" => Ok(ImageFormat::Eps),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "pdf" => Ok(ImageFormat::Pdf),
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "tex" => Ok(ImageFormat::Tex),
            "tif" | "tiff" => Ok(ImageFormat::Tiff),
            _ => Err(ConfigurationError::UnsupportedExtension(format!(".{}", extension))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ConfigurationError::MissingExtension(path.to_path_buf()))?;
        Self::from_extension(extension)
    }

    /// Raster formats are rendered at [`RASTER_DPI`].
    pub fn is_raster(self) -> bool {
        matches!(self, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff)
    }
}

pub const RASTER_DPI: f64 = 96.0;

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Eps => "EPS",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Pdf => "PDF",
            ImageFormat::Png => "PNG",
            ImageFormat::Svg => "SVG",
            ImageFormat::Tex => "TeX",
            ImageFormat::Tiff => "TIFF",
        };
        f.write_str(name)
    }
}
