//! Writing charts to every supported format.

use memplot::{
    Chart, ConfigurationError, ExportError, Exporter, Length, MemoryChartBuilder,
    MemoryCollection, MemoryCollectionBuilder, MemorySample, RenderConfig,
};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn collection() -> MemoryCollection {
    MemoryCollectionBuilder::new()
        .subject_id(777)
        .sample_interval(Duration::from_millis(50))
        .samples((0..40u64).map(|i| MemorySample {
            elapsed: Duration::from_millis(50 * i),
            resident_bytes: 8 * 1024 * 1024 + i * 64 * 1024,
            virtual_bytes: 64 * 1024 * 1024 + (i % 7) * 512 * 1024,
        }))
        .build()
        .unwrap()
}

fn chart(show_resident: bool, show_virtual: bool) -> Chart {
    let config = RenderConfig {
        show_resident,
        show_virtual,
        width: size("16cm"),
        height: size("12cm"),
        output_path: "unused".into(),
    };
    MemoryChartBuilder::new().build(&collection(), &config).unwrap()
}

fn size(text: &str) -> Length {
    text.parse().unwrap()
}

fn export_to(path: &Path, chart: &Chart) -> Result<Vec<u8>, ExportError> {
    Exporter::new().export(chart, size("16cm"), size("12cm"), path)?;
    Ok(fs::read(path).unwrap())
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn png_export_writes_an_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.png");
    let bytes = export_to(&path, &chart(true, true)).unwrap();

    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert_eq!(dir_entries(dir.path()), ["plot.png"]);
}

#[test]
fn other_raster_formats() {
    let dir = tempdir().unwrap();
    let chart = chart(true, false);

    for name in ["plot.jpg", "plot.jpeg", "plot.JPG"] {
        let bytes = export_to(&dir.path().join(name), &chart).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]), "{name}");
    }
    for name in ["plot.tif", "plot.tiff"] {
        let bytes = export_to(&dir.path().join(name), &chart).unwrap();
        assert!(
            bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"),
            "{name}"
        );
    }
}

#[test]
fn svg_export_contains_the_labels() {
    let dir = tempdir().unwrap();
    let bytes = export_to(&dir.path().join("plot.svg"), &chart(true, true)).unwrap();
    let svg = String::from_utf8(bytes).unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("Memory Plot of PID 777"));
    assert!(svg.contains("KiloBytes"));
    assert!(svg.contains("RSS"));
    assert!(svg.contains("VSZ"));
}

#[test]
fn vector_formats() {
    let dir = tempdir().unwrap();
    let chart = chart(true, true);

    let eps = String::from_utf8(export_to(&dir.path().join("plot.eps"), &chart).unwrap()).unwrap();
    assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
    assert!(eps.contains("(Memory Plot of PID 777)"));
    assert!(eps.contains("(RSS)"));

    let pdf = export_to(&dir.path().join("plot.pdf"), &chart).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF"));

    let tex = String::from_utf8(export_to(&dir.path().join("plot.tex"), &chart).unwrap()).unwrap();
    assert!(tex.contains("\\begin{tikzpicture}"));
    assert!(tex.contains("{Time (Seconds)}"));
    assert!(tex.contains("{VSZ}"));
}

#[test]
fn chart_without_series_still_exports() {
    let dir = tempdir().unwrap();
    let empty = chart(false, false);
    assert!(empty.series.is_empty());

    for name in ["empty.png", "empty.svg", "empty.pdf"] {
        let bytes = export_to(&dir.path().join(name), &empty).unwrap();
        assert!(!bytes.is_empty(), "{name}");
    }
}

#[test]
fn unsupported_extension_creates_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.bmp");

    let result = export_to(&path, &chart(true, false));
    assert!(matches!(
        result,
        Err(ExportError::Configuration(ConfigurationError::UnsupportedExtension(_)))
    ));
    assert!(!path.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("plot.png");

    let result = export_to(&path, &chart(true, false));
    assert!(matches!(result, Err(ExportError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn replaces_an_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.svg");
    fs::write(&path, "stale").unwrap();

    let bytes = export_to(&path, &chart(true, false)).unwrap();
    assert!(String::from_utf8(bytes).unwrap().contains("<svg"));
    assert_eq!(dir_entries(dir.path()), ["plot.svg"]);
}

#[test]
fn raster_size_follows_the_physical_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plot.png");
    Exporter::new()
        .export(&chart(true, false), size("4in"), size("3in"), &path)
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    // IHDR: width and height as big-endian u32 after the 8-byte signature
    // and the 8-byte chunk header.
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    assert_eq!((width, height), (384, 288));
}
