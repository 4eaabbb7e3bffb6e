//! Grid geometry

use serde::{Deserialize, Serialize};

use crate::{AtlasError, AtlasResult};

/// Unvalidated grid dimensions, as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Cells per row
    pub columns: u32,
    /// Number of rows
    pub rows: u32,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
}

/// Validated fixed-cell grid
///
/// Every dimension is non-zero and the atlas pixel size fits in `u32`; a
/// `GridSpec` cannot be constructed or deserialized otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridDimensions", into = "GridDimensions")]
pub struct GridSpec {
    columns: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
}

impl GridSpec {
    /// 16 columns x 6 rows of 32x32 cells, enough for printable ASCII
    pub const DEFAULT: Self = Self { columns: 16, rows: 6, cell_width: 32, cell_height: 32 };

    /// 16x24 cells fitted to a 256x256 canvas (16 columns x 10 rows)
    pub const LEGACY_CONSOLAS: Self = Self { columns: 16, rows: 10, cell_width: 16, cell_height: 24 };

    /// Create a grid, rejecting zero dimensions
    pub fn new(columns: u32, rows: u32, cell_width: u32, cell_height: u32) -> AtlasResult<Self> {
        let zero = [
            ("columns", columns),
            ("rows", rows),
            ("cell width", cell_width),
            ("cell height", cell_height),
        ]
        .into_iter()
        .find(|&(_, value)| value == 0);

        if let Some((name, _)) = zero {
            return Err(AtlasError::InvalidGrid(format!("{name} must be at least 1")));
        }

        if columns.checked_mul(cell_width).is_none() || rows.checked_mul(cell_height).is_none() {
            return Err(AtlasError::InvalidGrid(format!(
                "{columns}x{rows} cells of {cell_width}x{cell_height} overflow the atlas size"
            )));
        }

        Ok(Self { columns, rows, cell_width, cell_height })
    }

    /// Derive columns and rows by fitting whole cells into a canvas
    pub fn fit_canvas(
        canvas_width: u32,
        canvas_height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> AtlasResult<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(AtlasError::InvalidGrid("cell size must be at least 1x1".to_string()));
        }
        let columns = canvas_width / cell_width;
        let rows = canvas_height / cell_height;
        if columns == 0 || rows == 0 {
            return Err(AtlasError::InvalidGrid(format!(
                "canvas {canvas_width}x{canvas_height} cannot hold a {cell_width}x{cell_height} cell"
            )));
        }
        Self::new(columns, rows, cell_width, cell_height)
    }

    /// Cells per row
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell width in pixels
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Cell height in pixels
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of cells
    pub const fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Atlas width in pixels
    pub const fn atlas_width(&self) -> u32 {
        self.columns * self.cell_width
    }

    /// Atlas height in pixels
    pub const fn atlas_height(&self) -> u32 {
        self.rows * self.cell_height
    }

    /// Atlas `(width, height)` in pixels
    pub const fn atlas_size(&self) -> (u32, u32) {
        (self.atlas_width(), self.atlas_height())
    }

    /// Column and row of a cell index, row-major
    pub fn cell_position(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.capacity() {
            return None;
        }
        let columns = self.columns as usize;
        Some(((index % columns) as u32, (index / columns) as u32))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<GridDimensions> for GridSpec {
    type Error = AtlasError;

    fn try_from(dims: GridDimensions) -> Result<Self, Self::Error> {
        Self::new(dims.columns, dims.rows, dims.cell_width, dims.cell_height)
    }
}

impl From<GridSpec> for GridDimensions {
    fn from(grid: GridSpec) -> Self {
        Self {
            columns: grid.columns,
            rows: grid.rows,
            cell_width: grid.cell_width,
            cell_height: grid.cell_height,
        }
    }
}

impl std::fmt::Display for GridSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} grid of {}x{} cells",
            self.columns, self.rows, self.cell_width, self.cell_height
        )
    }
}
