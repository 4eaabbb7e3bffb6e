//! Whole-pipeline tests
//!
//! Font candidates point at files that do not exist, so most builds run on
//! the built-in font and the results are identical on every machine. Vector
//! font coverage uses the DejaVu Sans Mono file shipped under `resources/`.

use std::path::PathBuf;

mod build_integration;

/// DejaVu Sans Mono, bundled for tests
pub(crate) fn test_font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("fonts")
        .join("DejaVuSansMono.ttf")
}
