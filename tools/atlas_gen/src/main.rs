//! Command-line front end for glyph atlas generation
//!
//! Starts from a preset (or a config file), applies flag overrides, then runs
//! one build. Exits non-zero on any validation or I/O failure.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use glyph_atlas::atlas::DEFAULT_PADDING;
use glyph_atlas::foundation::logging;
use glyph_atlas::prelude::*;

const PRESET_TOOLS: &str = "tools";
const PRESET_LEGACY: &str = "legacy";

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let config = config_from_matches(&matches)?;

    logging::init_with_level(&log_filter(&config, matches.get_count("verbose")));
    log::debug!("Atlas configuration: {:?}", config);

    let build = build_atlas(&config)
        .with_context(|| format!("Failed to build font atlas {}", config.output_path.display()))?;

    println!(
        "Font atlas written to {} ({} glyphs, font: {})",
        build.image_path.display(),
        build.layout.len(),
        build.font
    );
    if let Some(descriptor) = &build.descriptor_path {
        println!("Descriptor written to {}", descriptor.display());
    }

    Ok(())
}

fn build_cli() -> Command {
    Command::new("atlas_gen")
        .about("Generates a fixed-grid bitmap font atlas for runtime text rendering")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Atlas PNG path [default: textures/font_atlas.png]"),
        )
        .arg(
            Arg::new("font-size")
                .short('s')
                .long("font-size")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(u32))
                .help("Font size in pixels [default: 32]"),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .value_name("COLSxROWS")
                .value_parser(parse_pair)
                .conflicts_with("canvas")
                .help("Grid size in cells [default: 16x6]"),
        )
        .arg(
            Arg::new("cell")
                .short('c')
                .long("cell")
                .value_name("WxH")
                .value_parser(parse_pair)
                .help("Cell size in pixels [default: 32x32]"),
        )
        .arg(
            Arg::new("canvas")
                .long("canvas")
                .value_name("WxH")
                .value_parser(parse_pair)
                .help("Derive the grid by fitting whole cells into this canvas"),
        )
        .arg(
            Arg::new("font")
                .short('f')
                .long("font")
                .value_name("PATH")
                .action(ArgAction::Append)
                .help("Font candidate, tried in the order given (repeatable)"),
        )
        .arg(
            Arg::new("chars")
                .long("chars")
                .value_name("STRING")
                .help("Characters to place, in cell order [default: printable ASCII]"),
        )
        .arg(
            Arg::new("placement")
                .long("placement")
                .value_name("POLICY")
                .value_parser(["fixed", "centered"])
                .help("Glyph placement inside each cell [default: centered]"),
        )
        .arg(
            Arg::new("padding")
                .long("padding")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(u32))
                .help("Fixed placement padding, implies --placement fixed [default: 2]"),
        )
        .arg(
            Arg::new("borders")
                .long("borders")
                .action(ArgAction::SetTrue)
                .help("Outline every cell for debugging"),
        )
        .arg(
            Arg::new("descriptor")
                .long("descriptor")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("no-descriptor")
                .help("Descriptor path [default: <output>.atlas.toml]"),
        )
        .arg(
            Arg::new("no-descriptor")
                .long("no-descriptor")
                .action(ArgAction::SetTrue)
                .help("Do not write the descriptor"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("preset")
                .help("Load the base configuration from a .toml or .ron file"),
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .value_name("NAME")
                .value_parser([PRESET_TOOLS, PRESET_LEGACY])
                .help("Base configuration [default: tools]"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Raise log verbosity (-v debug, -vv trace)"),
        )
}

/// Parse `16x6` style pairs
fn parse_pair(value: &str) -> Result<(u32, u32), String> {
    let (first, second) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid number '{part}' in '{value}': {e}"))
    };
    Ok((parse(first)?, parse(second)?))
}

fn base_config(matches: &ArgMatches) -> Result<AtlasConfig> {
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        return AtlasConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match matches.get_one::<String>("preset").map(String::as_str) {
        None | Some(PRESET_TOOLS) => Ok(AtlasConfig::new()),
        Some(PRESET_LEGACY) => Ok(AtlasConfig::legacy_consolas()),
        Some(other) => bail!("Unknown preset '{other}'"),
    }
}

fn config_from_matches(matches: &ArgMatches) -> Result<AtlasConfig> {
    let mut config = base_config(matches)?;

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config = config.with_output_path(output);
    }
    if let Some(&size) = matches.get_one::<u32>("font-size") {
        config = config.with_font_size(size);
    }
    if let Some(fonts) = matches.get_many::<String>("font") {
        config = config.with_font_candidates(fonts.cloned());
    }
    if let Some(chars) = matches.get_one::<String>("chars") {
        config = config.with_characters(chars.as_str());
    }

    let grid = grid_from_matches(matches, &config.grid)?;
    config = config.with_grid(grid);
    let placement = placement_from_matches(matches, config.placement)?;
    config = config.with_placement(placement);

    if matches.get_flag("borders") {
        config = config.with_debug_borders(true);
    }
    if let Some(descriptor) = matches.get_one::<PathBuf>("descriptor") {
        config = config.with_descriptor_path(descriptor);
    }
    if matches.get_flag("no-descriptor") {
        config = config.without_descriptor();
    }

    config.validate().context("Invalid atlas configuration")?;
    Ok(config)
}

fn grid_from_matches(matches: &ArgMatches, current: &GridSpec) -> Result<GridSpec> {
    let (cell_width, cell_height) = matches
        .get_one::<(u32, u32)>("cell")
        .copied()
        .unwrap_or((current.cell_width(), current.cell_height()));

    if let Some(&(canvas_width, canvas_height)) = matches.get_one::<(u32, u32)>("canvas") {
        return GridSpec::fit_canvas(canvas_width, canvas_height, cell_width, cell_height)
            .context("Invalid --canvas/--cell combination");
    }

    let (columns, rows) = matches
        .get_one::<(u32, u32)>("grid")
        .copied()
        .unwrap_or((current.columns(), current.rows()));

    GridSpec::new(columns, rows, cell_width, cell_height).context("Invalid --grid/--cell combination")
}

/// `--padding` alone selects fixed placement; it cannot combine with `centered`
fn placement_from_matches(matches: &ArgMatches, current: Placement) -> Result<Placement> {
    let padding = matches.get_one::<u32>("padding").copied();
    let current_padding = match current {
        Placement::FixedOffset { padding } => padding,
        Placement::Centered => DEFAULT_PADDING,
    };

    match (matches.get_one::<String>("placement").map(String::as_str), padding) {
        (Some("centered"), Some(_)) => bail!("--padding only applies to --placement fixed"),
        (Some("centered"), None) => Ok(Placement::Centered),
        (Some(_), padding) | (None, padding @ Some(_)) => Ok(Placement::FixedOffset {
            padding: padding.unwrap_or(current_padding),
        }),
        (None, None) => Ok(current),
    }
}

fn log_filter(config: &AtlasConfig, verbosity: u8) -> String {
    match verbosity {
        0 => config.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(args: &[&str]) -> Result<AtlasConfig> {
        let matches = build_cli().try_get_matches_from(std::iter::once("atlas_gen").chain(args.iter().copied()))?;
        config_from_matches(&matches)
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("16x6"), Ok((16, 6)));
        assert_eq!(parse_pair("256X256"), Ok((256, 256)));
        assert!(parse_pair("16").is_err());
        assert!(parse_pair("ax6").is_err());
        assert!(parse_pair("16x-1").is_err());
    }

    #[test]
    fn test_defaults_match_tools_preset() {
        let config = config_for(&[]).unwrap();
        assert_eq!(config, AtlasConfig::new());
    }

    #[test]
    fn test_legacy_preset() {
        let config = config_for(&["--preset", "legacy"]).unwrap();
        assert_eq!(config.grid, GridSpec::LEGACY_CONSOLAS);
        assert_eq!(config.font_size, 20);
        assert!(config.debug_borders);
        assert_eq!(config.output_path, PathBuf::from("assets/fonts/consolas.png"));
    }

    #[test]
    fn test_overrides() {
        let config = config_for(&[
            "-o", "out/atlas.png", "-s", "24", "-g", "8x12", "-c", "16x20", "-f", "a.ttf", "-f", "b.ttf",
            "--chars", "ABC", "--placement", "fixed", "--padding", "3", "--borders",
        ])
        .unwrap();

        assert_eq!(config.output_path, PathBuf::from("out/atlas.png"));
        assert_eq!(config.font_size, 24);
        assert_eq!(config.grid, GridSpec::new(8, 12, 16, 20).unwrap());
        assert_eq!(config.font_candidates, vec!["a.ttf".to_string(), "b.ttf".to_string()]);
        assert_eq!(config.characters, CharacterSet::from("ABC"));
        assert_eq!(config.placement, Placement::FixedOffset { padding: 3 });
        assert!(config.debug_borders);
    }

    #[test]
    fn test_canvas_fits_grid() {
        let config = config_for(&["--canvas", "256x256", "--cell", "16x24"]).unwrap();
        assert_eq!(config.grid, GridSpec::LEGACY_CONSOLAS);
    }

    #[test]
    fn test_canvas_conflicts_with_grid() {
        assert!(config_for(&["--canvas", "256x256", "--grid", "16x6"]).is_err());
    }

    #[test]
    fn test_zero_grid_rejected() {
        assert!(config_for(&["--grid", "0x6"]).is_err());
    }

    #[test]
    fn test_descriptor_flags() {
        let config = config_for(&["--descriptor", "out/layout.ron"]).unwrap();
        assert_eq!(config.resolved_descriptor_path(), Some(PathBuf::from("out/layout.ron")));

        let config = config_for(&["--no-descriptor"]).unwrap();
        assert_eq!(config.resolved_descriptor_path(), None);
    }

    #[test]
    fn test_padding_selects_fixed_placement() {
        let config = config_for(&["--preset", "legacy", "--padding", "4"]).unwrap();
        assert_eq!(config.placement, Placement::FixedOffset { padding: 4 });

        let config = config_for(&["--padding", "4"]).unwrap();
        assert_eq!(config.placement, Placement::FixedOffset { padding: 4 });

        let config = config_for(&["--placement", "fixed"]).unwrap();
        assert_eq!(config.placement, Placement::FixedOffset { padding: DEFAULT_PADDING });
    }

    #[test]
    fn test_padding_with_centered_rejected() {
        let err = config_for(&["--placement", "centered", "--padding", "4"]).unwrap_err();
        assert!(err.to_string().contains("--padding"));
    }

    #[test]
    fn test_config_file_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.toml");
        AtlasConfig::legacy_consolas().save_to_file(&path).unwrap();

        let config = config_for(&["--config", path.to_str().unwrap(), "-s", "18"]).unwrap();
        assert_eq!(config.grid, GridSpec::LEGACY_CONSOLAS);
        assert_eq!(config.font_size, 18);
    }

    #[test]
    fn test_verbosity_filter() {
        let config = AtlasConfig::new();
        assert_eq!(log_filter(&config, 0), "info");
        assert_eq!(log_filter(&config, 1), "debug");
        assert_eq!(log_filter(&config, 3), "trace");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }
}
