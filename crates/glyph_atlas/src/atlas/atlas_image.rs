//! Atlas pixel buffer
//!
//! RGBA8 image the renderer draws into and the writer persists. Starts fully
//! transparent; glyphs are composited source-over.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{CellAssignment, GridSpec};
use crate::{AtlasError, AtlasResult};

/// Fully transparent pixel
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// RGBA atlas image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    pixels: RgbaImage,
}

impl AtlasImage {
    /// Create a transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(TRANSPARENT)),
        }
    }

    /// Create a transparent image sized for a grid
    pub fn for_grid(grid: &GridSpec) -> Self {
        let (width, height) = grid.atlas_size();
        Self::new(width, height)
    }

    /// Load an atlas image from a file, converting to RGBA8
    pub fn from_file<P: AsRef<Path>>(path: P) -> AtlasResult<Self> {
        let path = path.as_ref();

        log::debug!("Loading atlas image from: {:?}", path);

        let img = image::open(path).map_err(|source| AtlasError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let pixels = img.to_rgba8();

        log::debug!("Loaded atlas image {}x{} from {:?}", pixels.width(), pixels.height(), path);

        Ok(Self { pixels })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Pixel at `(x, y)`, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Overwrite a pixel; out-of-bounds writes are ignored
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(pixel) = self.pixels.get_pixel_mut_checked(x, y) {
            *pixel = Rgba(rgba);
        }
    }

    /// Composite `color` at `coverage` alpha over the existing pixel
    ///
    /// Standard source-over with straight alpha. Out-of-bounds writes are
    /// ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 3], coverage: u8) {
        if coverage == 0 {
            return;
        }
        let Some(pixel) = self.pixels.get_pixel_mut_checked(x, y) else {
            return;
        };

        let src_a = f32::from(coverage) / 255.0;
        let dst_a = f32::from(pixel.0[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let mut out = [0u8; 4];
        for channel in 0..3 {
            let src = f32::from(color[channel]);
            let dst = f32::from(pixel.0[channel]);
            let value = (src * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            out[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;

        *pixel = Rgba(out);
    }

    /// Whether every pixel has zero alpha
    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Whether every pixel of a cell has zero alpha
    pub fn cell_is_transparent(&self, cell: &CellAssignment) -> bool {
        (cell.y..cell.bottom())
            .flat_map(|y| (cell.x..cell.right()).map(move |x| (x, y)))
            .all(|(x, y)| self.pixel(x, y).map_or(true, |p| p[3] == 0))
    }

    /// Tight bounding box `(min_x, min_y, max_x, max_y)` of non-transparent
    /// pixels inside a cell, inclusive; `None` for a blank cell
    pub fn ink_bounds(&self, cell: &CellAssignment) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in cell.y..cell.bottom() {
            for x in cell.x..cell.right() {
                if self.pixel(x, y).map_or(false, |p| p[3] > 0) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds
    }

    /// Borrow the underlying image buffer
    pub const fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_raw()
    }
}

impl From<RgbaImage> for AtlasImage {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let img = AtlasImage::for_grid(&GridSpec::DEFAULT);
        assert_eq!(img.dimensions(), (512, 192));
        assert!(img.is_fully_transparent());
        assert_eq!(img.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(img.pixel(512, 0), None);
    }

    #[test]
    fn test_blend_onto_transparent() {
        let mut img = AtlasImage::new(2, 2);
        img.blend_pixel(0, 0, [255, 255, 255], 255);
        img.blend_pixel(1, 0, [255, 255, 255], 128);
        assert_eq!(img.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(img.pixel(1, 0), Some([255, 255, 255, 128]));
        assert_eq!(img.pixel(0, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_blend_keeps_existing_alpha() {
        let mut img = AtlasImage::new(1, 1);
        img.put_pixel(0, 0, [64, 64, 64, 255]);
        img.blend_pixel(0, 0, [255, 255, 255], 0);
        assert_eq!(img.pixel(0, 0), Some([64, 64, 64, 255]));

        img.blend_pixel(0, 0, [255, 255, 255], 255);
        assert_eq!(img.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_blend_partial_over_opaque() {
        let mut img = AtlasImage::new(1, 1);
        img.put_pixel(0, 0, [0, 0, 0, 255]);
        img.blend_pixel(0, 0, [255, 255, 255], 51);
        let [r, g, b, a] = img.pixel(0, 0).unwrap();
        assert_eq!(a, 255);
        assert_eq!((r, g, b), (51, 51, 51));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut img = AtlasImage::new(1, 1);
        img.blend_pixel(5, 5, [255, 255, 255], 255);
        img.put_pixel(1, 0, [255; 4]);
        assert!(img.is_fully_transparent());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = AtlasImage::from_file(dir.path().join("missing.png"));
        assert!(matches!(result, Err(AtlasError::Read { .. })));
    }
}
