//! Icon loading, PNG export and output file naming

use crate::io::configuration::{OUTPUT_PREFIX, OUTPUT_TIMESTAMP_FORMAT};
use crate::io::error::{CloudError, Result, WithContext};
use chrono::{DateTime, TimeZone};
use image::RgbaImage;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Decode an icon file into RGBA pixels
///
/// # Errors
///
/// Returns [`CloudError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_icon(path: &Path) -> Result<RgbaImage> {
    let icon = image::open(path).with_path(path, "load icon")?;
    Ok(icon.to_rgba8())
}

/// Format a run timestamp the way output file names embed it
pub fn output_timestamp<Tz>(moment: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    moment.format(OUTPUT_TIMESTAMP_FORMAT).to_string()
}

/// Path of the `index`-th image written by a run started at `timestamp`
///
/// Names follow `<dir>/image-cloud_<timestamp>_<index>.png`.
pub fn output_path(dir: &Path, timestamp: &str, index: usize) -> PathBuf {
    dir.join(format!("{OUTPUT_PREFIX}_{timestamp}_{index}.png"))
}

/// Path of the snapshot written alongside an image
pub fn snapshot_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}

/// Path of the placement animation written alongside an image
pub fn visualization_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("gif")
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    image.save(path).map_err(|e| CloudError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
