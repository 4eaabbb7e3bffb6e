//! Atlas descriptor sidecar
//!
//! Persists the grid geometry and the ordered character set next to the atlas
//! image, so a consumer rebuilds the exact same [`AtlasLayout`] instead of
//! hardcoding it. Regenerating the atlas with a different character order is
//! caught by [`AtlasDescriptor::check_compatible`] rather than silently
//! corrupting UV lookups.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{compute_layout, AtlasLayout, CharacterSet, GridSpec, Placement};
use crate::config::{self, ConfigError};
use crate::font::FontHandle;

/// Current descriptor format version
pub const DESCRIPTOR_FORMAT_VERSION: u32 = 1;

/// Extension appended to the image stem for the default descriptor path
pub const DESCRIPTOR_EXTENSION: &str = "atlas.toml";

/// Errors loading, saving or checking a descriptor
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Descriptor file could not be read, parsed or written
    #[error("Descriptor file error: {0}")]
    Config(#[from] ConfigError),

    /// Descriptor directory could not be created
    #[error("Failed to create descriptor directory: {0}")]
    Io(#[from] std::io::Error),

    /// Written by an incompatible generator
    #[error("Unsupported descriptor format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Version this build understands
        expected: u32,
    },

    /// Grid fields do not form a valid grid
    #[error("Descriptor grid is invalid: {0}")]
    InvalidGrid(String),

    /// Consumer grid differs from the generated one
    #[error("Grid mismatch: atlas has {found}, consumer expects {expected}")]
    GridMismatch {
        /// Grid the atlas was generated with
        found: GridSpec,
        /// Grid the consumer was configured with
        expected: GridSpec,
    },

    /// Consumer character order differs from the generated one
    #[error("Character order mismatch at index {index}: atlas has {found:?}, consumer expects {expected:?}")]
    CharacterMismatch {
        /// First differing placement index
        index: usize,
        /// Character in the atlas, if any
        found: Option<char>,
        /// Character the consumer expects, if any
        expected: Option<char>,
    },
}

/// Machine-readable description of a generated atlas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Descriptor format version
    pub format_version: u32,
    /// Atlas image path, relative to the descriptor's directory
    pub image: String,
    /// Atlas width in pixels
    pub image_width: u32,
    /// Atlas height in pixels
    pub image_height: u32,
    /// Cells per row
    pub columns: u32,
    /// Number of rows
    pub rows: u32,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Font the glyphs were rendered with
    pub font: String,
    /// Font size in pixels
    pub font_size: u32,
    /// Ordered character set; index `i` maps to cell `i`
    pub characters: CharacterSet,
    /// Placement policy used
    pub placement: Placement,
}

impl AtlasDescriptor {
    /// Describe a finished build whose descriptor will live at `descriptor_path`
    pub fn from_build(
        layout: &AtlasLayout,
        characters: &CharacterSet,
        image_path: &Path,
        descriptor_path: &Path,
        font: &FontHandle,
        placement: Placement,
    ) -> Self {
        let grid = layout.grid();
        let (image_width, image_height) = layout.atlas_size();
        let descriptor_dir = descriptor_path.parent().unwrap_or_else(|| Path::new(""));
        let image = relative_path(image_path, descriptor_dir).to_string_lossy().into_owned();

        Self {
            format_version: DESCRIPTOR_FORMAT_VERSION,
            image,
            image_width,
            image_height,
            columns: grid.columns(),
            rows: grid.rows(),
            cell_width: grid.cell_width(),
            cell_height: grid.cell_height(),
            font: font.source().to_string(),
            font_size: font.size(),
            characters: characters.clone(),
            placement,
        }
    }

    /// Default sidecar path: `textures/font_atlas.png` → `textures/font_atlas.atlas.toml`
    pub fn default_path(image_path: &Path) -> PathBuf {
        image_path.with_extension(DESCRIPTOR_EXTENSION)
    }

    /// Grid described by this file
    pub fn grid(&self) -> Result<GridSpec, DescriptorError> {
        GridSpec::new(self.columns, self.rows, self.cell_width, self.cell_height)
            .map_err(|e| DescriptorError::InvalidGrid(e.to_string()))
    }

    /// Rebuild the layout the atlas was generated with
    pub fn to_layout(&self) -> Result<AtlasLayout, DescriptorError> {
        Ok(compute_layout(&self.characters, &self.grid()?))
    }

    /// Image path resolved against the descriptor's directory
    pub fn image_path(&self, descriptor_path: &Path) -> PathBuf {
        descriptor_path
            .parent()
            .map_or_else(|| PathBuf::from(&self.image), |dir| dir.join(&self.image))
    }

    /// Check that a consumer's grid and character order match this atlas
    pub fn check_compatible(&self, characters: &CharacterSet, grid: &GridSpec) -> Result<(), DescriptorError> {
        let found = self.grid()?;
        if found != *grid {
            return Err(DescriptorError::GridMismatch { found, expected: *grid });
        }

        let atlas = self.characters.as_slice();
        let consumer = characters.as_slice();
        let mismatch = (0..atlas.len().max(consumer.len()))
            .find(|&i| atlas.get(i) != consumer.get(i));

        match mismatch {
            Some(index) => Err(DescriptorError::CharacterMismatch {
                index,
                found: atlas.get(index).copied(),
                expected: consumer.get(index).copied(),
            }),
            None => Ok(()),
        }
    }

    /// Load and version-check a descriptor (`.toml` or `.ron`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let descriptor: Self = config::load_file(path.as_ref())?;
        if descriptor.format_version != DESCRIPTOR_FORMAT_VERSION {
            return Err(DescriptorError::UnsupportedVersion {
                found: descriptor.format_version,
                expected: DESCRIPTOR_FORMAT_VERSION,
            });
        }
        Ok(descriptor)
    }

    /// Write the descriptor, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DescriptorError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        config::save_file(self, path)?;
        log::info!("Atlas descriptor saved to {}", path.display());
        Ok(())
    }
}

/// Path of `target` as seen from `base_dir`
///
/// Both are made absolute against the working directory when only one of
/// them is. Falls back to `target` itself when no relative path exists
/// (different drive, or `base_dir` climbs out through `..`).
fn relative_path(target: &Path, base_dir: &Path) -> PathBuf {
    let (target, base_dir) = if target.is_absolute() == base_dir.is_absolute() {
        (target.to_path_buf(), base_dir.to_path_buf())
    } else {
        match std::env::current_dir() {
            Ok(cwd) => (cwd.join(target), cwd.join(base_dir)),
            Err(_) => return target.to_path_buf(),
        }
    };

    let target_parts: Vec<Component<'_>> = target.components().filter(|c| *c != Component::CurDir).collect();
    let base_parts: Vec<Component<'_>> = base_dir.components().filter(|c| *c != Component::CurDir).collect();
    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let climb = &base_parts[common..];
    if climb.iter().any(|c| !matches!(c, Component::Normal(_))) {
        return target.clone();
    }

    let mut relative: PathBuf = climb.iter().map(|_| Component::ParentDir).collect();
    relative.extend(&target_parts[common..]);
    relative
}

impl AtlasLayout {
    /// Load a descriptor and rebuild its layout in one step
    pub fn from_descriptor(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        AtlasDescriptor::load(path)?.to_layout()
    }
}
