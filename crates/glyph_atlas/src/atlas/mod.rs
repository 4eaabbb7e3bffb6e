//! Atlas layout, rendering and output
//!
//! The build pipeline, in order: compute the [`AtlasLayout`] from a
//! [`CharacterSet`] and [`GridSpec`], render glyphs into an [`AtlasImage`],
//! then write the image and its [`AtlasDescriptor`].

pub mod atlas_image;
pub mod charset;
pub mod descriptor;
pub mod grid;
pub mod layout;
pub mod renderer;
pub mod writer;

pub use atlas_image::{AtlasImage, TRANSPARENT};
pub use charset::{CharacterSet, ASCII_END, ASCII_START};
pub use descriptor::{AtlasDescriptor, DescriptorError, DESCRIPTOR_EXTENSION, DESCRIPTOR_FORMAT_VERSION};
pub use grid::{GridDimensions, GridSpec};
pub use layout::{compute_layout, AtlasLayout, CellAssignment};
pub use renderer::{
    draw_cell_border, glyph_origin, render_atlas, render_glyph, Placement, RenderOptions, BORDER_COLOR,
    DEFAULT_PADDING, GLYPH_COLOR,
};
pub use writer::{ensure_parent_dir, write_atlas};
