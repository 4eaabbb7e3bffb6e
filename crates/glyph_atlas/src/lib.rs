//! # Glyph Atlas
//!
//! Fixed-grid bitmap font atlas generation for runtime text renderers.
//!
//! ## Features
//!
//! - **Font Resolution**: Prioritized candidate list with a built-in bitmap fallback
//! - **Grid Layout**: Deterministic row-major character → cell mapping
//! - **Glyph Rendering**: Fixed-offset or centered placement, optional debug borders
//! - **Atlas Output**: Lossless RGBA PNG plus a versioned grid descriptor
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyph_atlas::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     glyph_atlas::foundation::logging::init();
//!
//!     let config = AtlasConfig::default()
//!         .with_output_path("textures/font_atlas.png")
//!         .with_placement(Placement::Centered);
//!
//!     let build = build_atlas(&config)?;
//!     if let Some(tilde) = build.layout.cell_for('~') {
//!         println!("'~' lives at ({}, {})", tilde.x, tilde.y);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub mod atlas;
pub mod config;
pub mod font;
pub mod foundation;

mod error;
mod pipeline;

#[cfg(test)]
mod tests;

pub use error::{AtlasError, AtlasResult};
pub use pipeline::{build_atlas, AtlasBuild};

/// Common imports for atlas generation
pub mod prelude {
    pub use crate::{
        atlas::{
            compute_layout, render_atlas, render_glyph, write_atlas, AtlasDescriptor, AtlasImage,
            AtlasLayout, CellAssignment, CharacterSet, GridSpec, Placement, RenderOptions,
        },
        build_atlas,
        config::{AtlasConfig, Config},
        font::{resolve_font, FontHandle, FontSource},
        AtlasBuild, AtlasError, AtlasResult,
    };
}
