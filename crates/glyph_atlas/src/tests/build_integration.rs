//! Build an atlas on disk and read it back

use std::path::Path;

use super::test_font_path;
use crate::atlas::{AtlasDescriptor, AtlasImage, AtlasLayout, CharacterSet, GridSpec, Placement};
use crate::config::{AtlasConfig, Config};
use crate::font::FontSource;
use crate::{build_atlas, AtlasError};
use approx::assert_relative_eq;

fn offline_config(output: &Path) -> AtlasConfig {
    AtlasConfig::default()
        .with_output_path(output)
        .with_font_candidates(["/nonexistent/fonts/mono.ttf", "no-such-face-installed.ttf"])
}

#[test]
fn test_printable_ascii_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("textures").join("font_atlas.png");

    let build = build_atlas(&offline_config(&output)).unwrap();
    let image = AtlasImage::from_file(&output).unwrap();
    assert_eq!(image.dimensions(), (512, 192));

    let space = build.layout.cell_for(' ').unwrap();
    assert_eq!((space.x, space.y, space.right(), space.bottom()), (0, 0, 32, 32));
    assert!(image.cell_is_transparent(space));

    let tilde = build.layout.cell_for('~').unwrap();
    assert_eq!((tilde.column, tilde.row), (14, 5));
    assert_eq!((tilde.x, tilde.y, tilde.right(), tilde.bottom()), (448, 160, 480, 192));
    assert!(!image.cell_is_transparent(tilde));

    // Centered ink never leaves its cell
    for cell in &build.layout {
        if let Some((x0, y0, x1, y1)) = image.ink_bounds(cell) {
            assert!(x0 >= cell.x && x1 < cell.right(), "{:?} leaks horizontally", cell.character);
            assert!(y0 >= cell.y && y1 < cell.bottom(), "{:?} leaks vertically", cell.character);
        }
    }

    // Last cell of the grid has no character
    assert!(build.layout.cell_at(95).is_none());
    let (uv_min, uv_max) = build.layout.uv_rect('~').unwrap();
    assert_relative_eq!(uv_min.x, 448.0 / 512.0);
    assert_relative_eq!(uv_max.y, 1.0);
}

#[test]
fn test_empty_charset_writes_transparent_image() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("empty.png");
    let config = offline_config(&output).with_characters("");

    let build = build_atlas(&config).unwrap();
    assert!(build.layout.is_empty());

    let image = AtlasImage::from_file(&output).unwrap();
    assert_eq!(image.dimensions(), (512, 192));
    assert!(image.is_fully_transparent());
}

#[test]
fn test_truncated_charset_still_builds() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("big.png");
    let characters = CharacterSet::from_range(0x100, 0x1C7).unwrap();
    assert_eq!(characters.len(), 200);

    let build = build_atlas(&offline_config(&output).with_characters(characters)).unwrap();
    assert_eq!(build.layout.len(), 96);
    assert_eq!(build.layout.dropped().len(), 104);
    assert!(output.is_file());
}

#[test]
fn test_descriptor_rebuilds_layout() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("font_atlas.png");

    let build = build_atlas(&offline_config(&output)).unwrap();
    let descriptor_path = build.descriptor_path.clone().unwrap();

    let descriptor = AtlasDescriptor::load(&descriptor_path).unwrap();
    assert_eq!(descriptor.image_path(&descriptor_path), output);
    assert_eq!(descriptor.font, "built-in 8x8 bitmap font");
    assert_eq!(AtlasLayout::from_descriptor(&descriptor_path).unwrap(), build.layout);
    assert!(descriptor
        .check_compatible(&CharacterSet::printable_ascii(), &GridSpec::DEFAULT)
        .is_ok());
}

#[test]
fn test_descriptor_in_separate_dir_points_at_image() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("textures").join("font_atlas.png");
    let descriptor_path = dir.path().join("meta").join("layout.toml");

    let config = offline_config(&output).with_descriptor_path(&descriptor_path);
    let build = build_atlas(&config).unwrap();
    assert_eq!(build.descriptor_path.as_deref(), Some(descriptor_path.as_path()));

    let descriptor = AtlasDescriptor::load(&descriptor_path).unwrap();
    let resolved = descriptor.image_path(&descriptor_path);
    assert!(resolved.is_file(), "{} does not exist", resolved.display());
    assert_eq!(resolved.canonicalize().unwrap(), output.canonicalize().unwrap());
    assert_eq!(
        AtlasImage::from_file(&resolved).unwrap().dimensions(),
        (descriptor.image_width, descriptor.image_height)
    );
}

#[test]
fn test_vector_font_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("font_atlas.png");
    let font_path = test_font_path();
    let config = AtlasConfig::default()
        .with_output_path(&output)
        .with_font_candidates(["/nonexistent/fonts/mono.ttf".to_string(), font_path.display().to_string()]);

    let build = build_atlas(&config).unwrap();
    assert_eq!(build.font, FontSource::File(font_path));
    assert_eq!(build.font_size, 32);

    let image = AtlasImage::from_file(&output).unwrap();
    for cell in &build.layout {
        let inked = !image.cell_is_transparent(cell);
        assert_eq!(inked, cell.character != ' ', "unexpected ink state for {:?}", cell.character);
    }

    let descriptor = AtlasDescriptor::load(build.descriptor_path.unwrap()).unwrap();
    assert!(descriptor.font.ends_with("DejaVuSansMono.ttf"));
    assert_eq!(descriptor.font_size, 32);
}

#[test]
fn test_no_descriptor_when_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("font_atlas.png");

    let build = build_atlas(&offline_config(&output).without_descriptor()).unwrap();
    assert_eq!(build.descriptor_path, None);
    assert!(!AtlasDescriptor::default_path(&output).exists());
}

#[test]
fn test_legacy_preset_builds() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("consolas.png");
    let config = AtlasConfig::legacy_consolas()
        .with_output_path(&output)
        .with_font_candidates(["/nonexistent/consolas.ttf"]);

    let build = build_atlas(&config).unwrap();
    let image = AtlasImage::from_file(&output).unwrap();
    assert_eq!(image.dimensions(), (256, 240));

    // Borders outline even the blank space cell
    let space = build.layout.cell_for(' ').unwrap();
    assert!(!image.cell_is_transparent(space));
    assert_eq!(config.placement, Placement::FixedOffset { padding: 2 });
}

#[test]
fn test_config_file_drives_build() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("atlas.ron");
    let output = dir.path().join("digits.png");

    offline_config(&output)
        .with_characters("0123456789")
        .with_grid(GridSpec::new(5, 2, 16, 16).unwrap())
        .save_to_file(&config_path)
        .unwrap();

    let config = AtlasConfig::load_from_file(&config_path).unwrap();
    let build = build_atlas(&config).unwrap();
    assert_eq!(build.layout.len(), 10);
    assert_eq!(AtlasImage::from_file(&output).unwrap().dimensions(), (80, 32));
}

#[test]
fn test_zero_grid_config_rejected_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("bad.toml");
    std::fs::write(&config_path, "[grid]\ncolumns = 16\nrows = 0\ncell_width = 32\ncell_height = 32\n").unwrap();

    assert!(AtlasConfig::load_from_file(&config_path).is_err());
    assert!(matches!(GridSpec::new(16, 0, 32, 32), Err(AtlasError::InvalidGrid(_))));
}
