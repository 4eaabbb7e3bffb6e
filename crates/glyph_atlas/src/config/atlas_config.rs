//! # Atlas Build Configuration
//!
//! Everything one atlas build needs: output location, font candidates and
//! size, grid geometry, character order and placement policy. Grid size and
//! centering are always explicit because consumers hardcode the layout they
//! were built against.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Config;
use crate::atlas::{AtlasDescriptor, CharacterSet, GridSpec, Placement, DEFAULT_PADDING};
use crate::{AtlasError, AtlasResult};

/// Default atlas output path
pub const DEFAULT_OUTPUT_PATH: &str = "textures/font_atlas.png";

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE: u32 = 32;

/// Prioritized font candidates tried when none are configured
///
/// Bare file names are searched for in the platform font directories.
pub fn default_font_candidates() -> Vec<String> {
    [
        "consolas.ttf",
        "arial.ttf",
        "C:/Windows/Fonts/consolas.ttf",
        "C:/Windows/Fonts/arial.ttf",
        "C:/Windows/Fonts/segoeui.ttf",
        "C:/Windows/Fonts/calibri.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "DejaVuSans.ttf",
        "/System/Library/Fonts/Menlo.ttc",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Configuration for a single atlas build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Where the atlas PNG is written
    pub output_path: PathBuf,
    /// Sidecar descriptor path, derived from `output_path` when unset
    pub descriptor_path: Option<PathBuf>,
    /// Whether to write the sidecar descriptor at all
    pub write_descriptor: bool,
    /// Font size in pixels
    pub font_size: u32,
    /// Font files or names, in priority order
    pub font_candidates: Vec<String>,
    /// Ordered characters; order defines cell assignment
    pub characters: CharacterSet,
    /// Outline every cell before drawing its glyph
    pub debug_borders: bool,
    /// Default log filter for the CLI
    pub log_level: String,
    /// Glyph placement inside each cell
    pub placement: Placement,
    /// Grid geometry
    pub grid: GridSpec,
}

impl AtlasConfig {
    /// Create the standard configuration: 16x6 grid of 32x32 cells, centered
    pub fn new() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            descriptor_path: None,
            write_descriptor: true,
            font_size: DEFAULT_FONT_SIZE,
            font_candidates: default_font_candidates(),
            characters: CharacterSet::printable_ascii(),
            debug_borders: false,
            log_level: "info".to_string(),
            placement: Placement::Centered,
            grid: GridSpec::DEFAULT,
        }
    }

    /// The older 256x256 consolas atlas: 16x24 cells, fixed offset, outlined cells
    pub fn legacy_consolas() -> Self {
        Self {
            output_path: PathBuf::from("assets/fonts/consolas.png"),
            font_size: 20,
            debug_borders: true,
            grid: GridSpec::LEGACY_CONSOLAS,
            placement: Placement::FixedOffset { padding: DEFAULT_PADDING },
            ..Self::new()
        }
    }

    /// Set the atlas output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set an explicit descriptor path
    pub fn with_descriptor_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor_path = Some(path.into());
        self.write_descriptor = true;
        self
    }

    /// Skip writing the sidecar descriptor
    pub fn without_descriptor(mut self) -> Self {
        self.write_descriptor = false;
        self
    }

    /// Set font size in pixels
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Replace the font candidate list
    pub fn with_font_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the character set
    pub fn with_characters(mut self, characters: impl Into<CharacterSet>) -> Self {
        self.characters = characters.into();
        self
    }

    /// Set the grid geometry
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Set the placement policy
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Enable or disable debug cell borders
    pub fn with_debug_borders(mut self, enabled: bool) -> Self {
        self.debug_borders = enabled;
        self
    }

    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Descriptor location for this build, if one is written
    pub fn resolved_descriptor_path(&self) -> Option<PathBuf> {
        if !self.write_descriptor {
            return None;
        }
        Some(
            self.descriptor_path
                .clone()
                .unwrap_or_else(|| AtlasDescriptor::default_path(&self.output_path)),
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> AtlasResult<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(AtlasError::InvalidConfig("Output path cannot be empty".to_string()));
        }

        if self.font_size == 0 {
            return Err(AtlasError::InvalidConfig("Font size must be at least 1px".to_string()));
        }

        if let Some(descriptor) = self.resolved_descriptor_path() {
            if descriptor == self.output_path {
                return Err(AtlasError::InvalidConfig(format!(
                    "Descriptor path {} would overwrite the atlas image",
                    descriptor.display()
                )));
            }
        }

        // Grid dimensions are checked on construction and deserialization
        Ok(())
    }

    /// Output path as a `Path`
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for AtlasConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AtlasConfig::default();
        assert_eq!(config.grid.columns(), 16);
        assert_eq!(config.grid.rows(), 6);
        assert_eq!(config.grid.cell_width(), 32);
        assert_eq!(config.grid.cell_height(), 32);
        assert_eq!(config.characters.len(), 95);
        assert_eq!(config.placement, Placement::Centered);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.resolved_descriptor_path(),
            Some(PathBuf::from("textures/font_atlas.atlas.toml"))
        );
    }

    #[test]
    fn test_legacy_preset() {
        let config = AtlasConfig::legacy_consolas();
        assert_eq!(config.grid.columns(), 16);
        assert_eq!(config.grid.rows(), 10);
        assert_eq!(config.grid.cell_width(), 16);
        assert_eq!(config.grid.cell_height(), 24);
        assert_eq!(config.placement, Placement::FixedOffset { padding: 2 });
        assert!(config.debug_borders);
    }

    #[test]
    fn test_validation_rejects_zero_font_size() {
        let config = AtlasConfig::default().with_font_size(0);
        assert!(matches!(config.validate(), Err(AtlasError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_rejects_descriptor_over_image() {
        let config = AtlasConfig::default()
            .with_output_path("out/atlas.toml")
            .with_descriptor_path("out/atlas.toml");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_without_descriptor() {
        let config = AtlasConfig::default().without_descriptor();
        assert_eq!(config.resolved_descriptor_path(), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.toml");

        let config = AtlasConfig::legacy_consolas()
            .with_characters("AB\"\\C")
            .with_font_candidates(["fonts/mono.ttf"]);
        config.save_to_file(&path).unwrap();

        let loaded = AtlasConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.ron");

        let config = AtlasConfig::default().with_placement(Placement::FixedOffset { padding: 4 });
        config.save_to_file(&path).unwrap();

        let loaded = AtlasConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "font_size = 24\n\n[grid]\ncolumns = 8\nrows = 12\ncell_width = 16\ncell_height = 16\n")
            .unwrap();

        let loaded = AtlasConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.font_size, 24);
        assert_eq!(loaded.grid.columns(), 8);
        assert_eq!(loaded.grid.capacity(), 96);
        assert_eq!(loaded.characters, CharacterSet::printable_ascii());
    }

    #[test]
    fn test_zero_grid_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[grid]\ncolumns = 0\nrows = 6\ncell_width = 32\ncell_height = 32\n").unwrap();

        assert!(AtlasConfig::load_from_file(&path).is_err());
    }
}
