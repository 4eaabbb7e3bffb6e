//! Font resolution and glyph rasterization
//!
//! A [`FontHandle`] is either a TrueType/OpenType face rasterized with
//! `fontdue`, or the built-in bitmap font used when no candidate loads.

use std::fmt;
use std::path::PathBuf;

use fontdue::{Font, FontSettings};

mod bitmap;
mod resolver;

pub use bitmap::{BitmapFont, BITMAP_GLYPH_SIZE, BUILTIN_FONT_SCALE};
pub use resolver::{font_search_dirs, load_candidate, locate_candidate, resolve_font};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading a font candidate
///
/// These never abort a build; the resolver logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Candidate could not be located on disk
    #[error("Font not found: {0}")]
    NotFound(String),

    /// Font file exists but could not be read
    #[error("Failed to read font {path:?}: {source}")]
    Read {
        /// Font file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Font data could not be parsed
    #[error("Failed to parse font {path:?}: {reason}")]
    Parse {
        /// Font file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Requested pixel size cannot be rendered
    #[error("Unsupported font size: {0}px")]
    UnsupportedSize(u32),
}

/// Where a resolved font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a font file
    File(PathBuf),
    /// Built-in bitmap font
    BuiltIn,
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => write!(f, "built-in 8x8 bitmap font"),
        }
    }
}

/// Rasterized glyph coverage and its position on the text line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Ink width in pixels
    pub width: u32,
    /// Ink height in pixels
    pub height: u32,
    /// Offset of the ink from the pen position, in pixels
    pub left: i32,
    /// Offset of the ink from the top of the line (ascent), in pixels
    pub top: i32,
    /// Row-major coverage, one byte per pixel
    pub coverage: Vec<u8>,
}

impl RasterGlyph {
    /// A glyph with no visible pixels
    pub const fn empty() -> Self {
        Self { width: 0, height: 0, left: 0, top: 0, coverage: Vec::new() }
    }

    /// Whether the glyph draws nothing
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.coverage.iter().all(|&c| c == 0)
    }

    /// Coverage at `(x, y)` inside the glyph, 0 outside
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

enum Face {
    Vector { font: Font, ascent: f32 },
    Bitmap(BitmapFont),
}

/// Resolved font face at a fixed pixel size
///
/// Immutable once resolved; dropped when the build finishes.
pub struct FontHandle {
    face: Face,
    size: u32,
    source: FontSource,
}

impl FontHandle {
    /// Parse TrueType/OpenType data at `size` pixels
    pub fn from_bytes(bytes: &[u8], size: u32, source: FontSource) -> FontResult<Self> {
        if size == 0 {
            return Err(FontError::UnsupportedSize(size));
        }

        let px = size as f32;
        let settings = FontSettings { scale: px, ..FontSettings::default() };
        let font = Font::from_bytes(bytes, settings).map_err(|e| FontError::Parse {
            path: match &source {
                FontSource::File(path) => path.clone(),
                FontSource::BuiltIn => PathBuf::new(),
            },
            reason: e.to_string(),
        })?;

        // Line ascent anchors fixed-offset placement; fall back to 80% of the em
        let ascent = font
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |metrics| metrics.ascent);

        Ok(Self {
            face: Face::Vector { font, ascent },
            size,
            source,
        })
    }

    /// The built-in bitmap font at its nominal size; cannot fail
    pub fn builtin() -> Self {
        let font = BitmapFont::new(BUILTIN_FONT_SCALE);
        Self {
            size: font.nominal_size(),
            face: Face::Bitmap(font),
            source: FontSource::BuiltIn,
        }
    }

    /// Where this font came from
    pub const fn source(&self) -> &FontSource {
        &self.source
    }

    /// Pixel size glyphs are rasterized at
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Whether this is the built-in fallback
    pub const fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Bitmap(_))
    }

    /// Whether the face has a glyph for `ch`
    pub fn has_glyph(&self, ch: char) -> bool {
        match &self.face {
            Face::Vector { font, .. } => font.lookup_glyph_index(ch) != 0,
            Face::Bitmap(font) => font.has_glyph(ch),
        }
    }

    /// Rasterize `ch` to coverage values
    ///
    /// Characters without ink (space) come back empty.
    pub fn rasterize(&self, ch: char) -> RasterGlyph {
        match &self.face {
            Face::Vector { font, ascent } => {
                let (metrics, coverage) = font.rasterize(ch, self.size as f32);
                if metrics.width == 0 || metrics.height == 0 {
                    return RasterGlyph::empty();
                }
                // fontdue's ymin is the bottom of the ink relative to the baseline, y up
                let ink_top = metrics.ymin + metrics.height as i32;
                RasterGlyph {
                    width: metrics.width as u32,
                    height: metrics.height as u32,
                    left: metrics.xmin,
                    top: ascent.round() as i32 - ink_top,
                    coverage,
                }
            }
            Face::Bitmap(font) => font.rasterize(ch),
        }
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("source", &self.source)
            .field("size", &self.size)
            .field("builtin", &self.is_builtin())
            .finish()
    }
}
