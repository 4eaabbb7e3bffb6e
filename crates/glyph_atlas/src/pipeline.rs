//! End-to-end atlas build
//!
//! Resolve a font, lay out the grid, render, write the PNG and its
//! descriptor. Each stage runs exactly once; the first fatal error aborts.

use std::path::PathBuf;

use crate::atlas::{compute_layout, render_atlas, write_atlas, AtlasDescriptor, AtlasLayout, RenderOptions};
use crate::config::AtlasConfig;
use crate::font::{resolve_font, FontSource};
use crate::AtlasResult;

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct AtlasBuild {
    /// Layout the image was rendered with
    pub layout: AtlasLayout,
    /// Where the atlas PNG was written
    pub image_path: PathBuf,
    /// Where the descriptor was written, if enabled
    pub descriptor_path: Option<PathBuf>,
    /// Font the glyphs came from
    pub font: FontSource,
    /// Effective font size in pixels
    pub font_size: u32,
}

/// Build the atlas described by `config`
///
/// The configuration is validated before anything touches disk. A font that
/// cannot be found is not an error; the built-in font is used instead.
pub fn build_atlas(config: &AtlasConfig) -> AtlasResult<AtlasBuild> {
    config.validate()?;

    let font = resolve_font(config.font_candidates.as_slice(), config.font_size);
    let layout = compute_layout(&config.characters, &config.grid);

    if layout.is_truncated() {
        log::warn!(
            "{} character(s) do not fit the {} and were dropped ({} of {} placed)",
            layout.dropped().len(),
            config.grid,
            layout.len(),
            config.characters.len()
        );
    }

    let options = RenderOptions {
        placement: config.placement,
        debug_borders: config.debug_borders,
    };
    let image = render_atlas(&layout, &font, &options);
    write_atlas(&image, &config.output_path)?;

    let descriptor_path = config.resolved_descriptor_path();
    if let Some(path) = &descriptor_path {
        AtlasDescriptor::from_build(
            &layout,
            &config.characters,
            &config.output_path,
            path,
            &font,
            config.placement,
        )
        .save(path)?;
    }

    let grid = layout.grid();
    log::info!(
        "Atlas ready: {}x{} grid, {}x{} cells, {}x{} image, placement {}",
        grid.columns(),
        grid.rows(),
        grid.cell_width(),
        grid.cell_height(),
        grid.atlas_width(),
        grid.atlas_height(),
        config.placement
    );
    log::info!("Character set ({}): {}", config.characters.len(), config.characters);

    Ok(AtlasBuild {
        layout,
        image_path: config.output_path.clone(),
        descriptor_path,
        font: font.source().clone(),
        font_size: font.size(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtlasError;

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("atlas.png");
        let config = AtlasConfig::default().with_output_path(&output).with_font_size(0);

        assert!(matches!(build_atlas(&config), Err(AtlasError::InvalidConfig(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_build_reports_paths() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("atlas.png");
        let config = AtlasConfig::default()
            .with_output_path(&output)
            .with_font_candidates(["/missing/font.ttf"]);

        let build = build_atlas(&config).unwrap();
        assert_eq!(build.image_path, output);
        assert_eq!(build.descriptor_path, Some(dir.path().join("atlas.atlas.toml")));
        assert_eq!(build.font, FontSource::BuiltIn);
        assert_eq!(build.layout.len(), 95);
    }
}
