//! Atlas layout engine
//!
//! Maps each character of a [`CharacterSet`] to a fixed-size cell of a
//! [`GridSpec`], row-major. The resulting [`AtlasLayout`] is the contract a
//! runtime text renderer uses for UV lookup.

use std::collections::HashMap;

use nalgebra::Vector2;

use super::{CharacterSet, GridSpec};

/// One character's cell in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAssignment {
    /// Character drawn in this cell
    pub character: char,
    /// Placement index in the character set
    pub index: usize,
    /// Grid column
    pub column: u32,
    /// Grid row
    pub row: u32,
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Cell width in pixels
    pub width: u32,
    /// Cell height in pixels
    pub height: u32,
}

impl CellAssignment {
    /// Exclusive right edge in pixels
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge in pixels
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the pixel lies inside this cell
    pub fn contains(&self, px: i64, py: i64) -> bool {
        px >= i64::from(self.x)
            && px < i64::from(self.right())
            && py >= i64::from(self.y)
            && py < i64::from(self.bottom())
    }

    /// Whether two cells share any pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Normalized texture coordinates `(uv_min, uv_max)`, top-left origin
    pub fn uv_rect(&self, atlas_size: (u32, u32)) -> (Vector2<f32>, Vector2<f32>) {
        let (atlas_width, atlas_height) = (atlas_size.0 as f32, atlas_size.1 as f32);
        let uv_min = Vector2::new(self.x as f32 / atlas_width, self.y as f32 / atlas_height);
        let uv_max = Vector2::new(self.right() as f32 / atlas_width, self.bottom() as f32 / atlas_height);
        (uv_min, uv_max)
    }
}

/// Character → cell mapping for one atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasLayout {
    grid: GridSpec,
    cells: Vec<CellAssignment>,
    lookup: HashMap<char, usize>,
    dropped: Vec<char>,
}

impl AtlasLayout {
    /// Grid the layout was computed for
    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Atlas `(width, height)` in pixels
    pub const fn atlas_size(&self) -> (u32, u32) {
        self.grid.atlas_size()
    }

    /// Cell of a character; the first occurrence wins for duplicates
    pub fn cell_for(&self, ch: char) -> Option<&CellAssignment> {
        self.lookup.get(&ch).map(|&index| &self.cells[index])
    }

    /// Cell at a placement index
    pub fn cell_at(&self, index: usize) -> Option<&CellAssignment> {
        self.cells.get(index)
    }

    /// Normalized UVs of a character's cell
    pub fn uv_rect(&self, ch: char) -> Option<(Vector2<f32>, Vector2<f32>)> {
        self.cell_for(ch).map(|cell| cell.uv_rect(self.atlas_size()))
    }

    /// Placed cells in placement order
    pub fn iter(&self) -> std::slice::Iter<'_, CellAssignment> {
        self.cells.iter()
    }

    /// Number of placed cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing was placed
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Characters that did not fit in the grid, in order
    pub fn dropped(&self) -> &[char] {
        &self.dropped
    }

    /// Whether the character set exceeded the grid capacity
    pub fn is_truncated(&self) -> bool {
        !self.dropped.is_empty()
    }
}

impl<'a> IntoIterator for &'a AtlasLayout {
    type Item = &'a CellAssignment;
    type IntoIter = std::slice::Iter<'a, CellAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Assign every character a cell, row-major
///
/// Pure and deterministic. Characters past `grid.capacity()` are not placed
/// and are listed in [`AtlasLayout::dropped`] instead.
pub fn compute_layout(charset: &CharacterSet, grid: &GridSpec) -> AtlasLayout {
    let capacity = grid.capacity();
    let placed = charset.len().min(capacity);

    let mut cells = Vec::with_capacity(placed);
    let mut lookup = HashMap::with_capacity(placed);

    for (index, character) in charset.iter().take(capacity).enumerate() {
        let Some((column, row)) = grid.cell_position(index) else {
            break;
        };
        cells.push(CellAssignment {
            character,
            index,
            column,
            row,
            x: column * grid.cell_width(),
            y: row * grid.cell_height(),
            width: grid.cell_width(),
            height: grid.cell_height(),
        });
        lookup.entry(character).or_insert(index);
    }

    AtlasLayout {
        grid: *grid,
        cells,
        lookup,
        dropped: charset.iter().skip(capacity).collect(),
    }
}
