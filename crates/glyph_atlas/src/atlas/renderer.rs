//! Glyph renderer
//!
//! Draws each character into its assigned cell. Every write is clipped to the
//! cell rectangle, so an oversized glyph can never bleed into a neighbour.

use serde::{Deserialize, Serialize};

use super::{AtlasImage, AtlasLayout, CellAssignment};
use crate::font::{FontHandle, RasterGlyph};

/// Glyph fill color (opaque white, coverage becomes alpha)
pub const GLYPH_COLOR: [u8; 3] = [255, 255, 255];

/// Debug cell outline color
pub const BORDER_COLOR: [u8; 4] = [64, 64, 64, 255];

/// Default fixed-offset padding in pixels
pub const DEFAULT_PADDING: u32 = 2;

/// Where a glyph sits inside its cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Cell origin plus padding, glyph at its natural line position
    FixedOffset {
        /// Padding from the cell's top-left corner, in pixels
        padding: u32,
    },
    /// Glyph ink box centered in the cell
    #[default]
    Centered,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixedOffset { padding } => write!(f, "fixed offset ({padding}px padding)"),
            Self::Centered => write!(f, "centered"),
        }
    }
}

/// Per-build rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Placement policy, constant for the whole atlas
    pub placement: Placement,
    /// Outline each cell before drawing its glyph
    pub debug_borders: bool,
}

/// Top-left pixel of the glyph ink for a placement policy
pub fn glyph_origin(cell: &CellAssignment, glyph: &RasterGlyph, placement: Placement) -> (i64, i64) {
    let cell_x = i64::from(cell.x);
    let cell_y = i64::from(cell.y);

    match placement {
        Placement::FixedOffset { padding } => (
            cell_x + i64::from(padding) + i64::from(glyph.left),
            cell_y + i64::from(padding) + i64::from(glyph.top),
        ),
        Placement::Centered => (
            cell_x + (i64::from(cell.width) - i64::from(glyph.width)).div_euclid(2),
            cell_y + (i64::from(cell.height) - i64::from(glyph.height)).div_euclid(2),
        ),
    }
}

/// Draw one character into its cell
///
/// Blank glyphs (space) and characters the font lacks leave the cell empty.
pub fn render_glyph(
    image: &mut AtlasImage,
    cell: &CellAssignment,
    ch: char,
    font: &FontHandle,
    placement: Placement,
) {
    if !font.has_glyph(ch) {
        log::warn!(
            "Font {} has no glyph for {:?} (U+{:04X}), leaving cell {} blank",
            font.source(),
            ch,
            ch as u32,
            cell.index
        );
        return;
    }

    let glyph = font.rasterize(ch);
    if glyph.is_empty() {
        return;
    }

    let (origin_x, origin_y) = glyph_origin(cell, &glyph, placement);
    let mut clipped = false;

    for gy in 0..glyph.height {
        for gx in 0..glyph.width {
            let coverage = glyph.coverage_at(gx, gy);
            if coverage == 0 {
                continue;
            }
            let px = origin_x + i64::from(gx);
            let py = origin_y + i64::from(gy);
            if !cell.contains(px, py) {
                clipped = true;
                continue;
            }
            image.blend_pixel(px as u32, py as u32, GLYPH_COLOR, coverage);
        }
    }

    if clipped {
        log::debug!(
            "Glyph {:?} ({}x{}) clipped to its {}x{} cell",
            ch,
            glyph.width,
            glyph.height,
            cell.width,
            cell.height
        );
    }
}

/// Outline a cell with a one-pixel border on its boundary
pub fn draw_cell_border(image: &mut AtlasImage, cell: &CellAssignment) {
    let (left, top) = (cell.x, cell.y);
    let (right, bottom) = (cell.right() - 1, cell.bottom() - 1);

    for x in left..=right {
        image.put_pixel(x, top, BORDER_COLOR);
        image.put_pixel(x, bottom, BORDER_COLOR);
    }
    for y in top..=bottom {
        image.put_pixel(left, y, BORDER_COLOR);
        image.put_pixel(right, y, BORDER_COLOR);
    }
}

/// Render every placed cell of a layout into a fresh transparent image
pub fn render_atlas(layout: &AtlasLayout, font: &FontHandle, options: &RenderOptions) -> AtlasImage {
    let (width, height) = layout.atlas_size();
    let mut image = AtlasImage::new(width, height);

    for cell in layout {
        if options.debug_borders {
            draw_cell_border(&mut image, cell);
        }
        render_glyph(&mut image, cell, cell.character, font, options.placement);
    }

    log::debug!(
        "Rendered {} glyph cell(s) into {}x{} atlas, placement {}",
        layout.len(),
        width,
        height,
        options.placement
    );

    image
}
