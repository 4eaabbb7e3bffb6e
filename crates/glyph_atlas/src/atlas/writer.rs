//! Atlas writer
//!
//! Persists the atlas as an RGBA PNG. Parent directories are created first;
//! an existing file is overwritten.

use std::path::Path;

use image::ImageFormat;

use super::AtlasImage;
use crate::{AtlasError, AtlasResult};

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent_dir(path: &Path) -> AtlasResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    std::fs::create_dir_all(parent).map_err(|source| AtlasError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

/// Write the atlas to `path` as a lossless RGBA PNG
pub fn write_atlas(image: &AtlasImage, path: impl AsRef<Path>) -> AtlasResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    image
        .as_rgba()
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| AtlasError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("Font atlas saved to {} ({}x{})", path.display(), image.width(), image.height());
    Ok(())
}
