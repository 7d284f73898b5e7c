//! Image source collaborator.
//!
//! Enumerates image files in a directory and decodes them into 8-bit RGB
//! pixel grids. Decoding is delegated to the `image` crate; everything
//! downstream works on [`RgbImage`] buffers with channel values 0-255.

use std::path::{Path, PathBuf};

use image::RgbImage;
use walkdir::WalkDir;

use crate::FeatureError;

/// File extensions recognized as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "ppm", "tif", "tiff", "bmp"];

/// Whether a path carries a recognized image extension.
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
}

/// List the image files directly inside `dir`, sorted by path.
///
/// The scan is non-recursive. Entries without a recognized image extension
/// are ignored.
///
/// # Errors
///
/// Returns [`FeatureError::Io`] if the directory cannot be read at all.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, FeatureError> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry.map_err(|source| FeatureError::Io {
            path: dir.display().to_string(),
            source: source.into(),
        })?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Decode a single image into an 8-bit RGB buffer.
///
/// # Errors
///
/// Returns [`FeatureError::Decode`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<RgbImage, FeatureError> {
    let decoded = image::open(path).map_err(|source| FeatureError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decoded.to_rgb8())
}

/// The file-name component of a path, as stored in persisted databases.
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
