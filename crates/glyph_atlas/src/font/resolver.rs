//! Font resolution as a fallback chain
//!
//! Candidates are tried once each, in priority order. The first one that
//! loads wins; if none do, the built-in bitmap font is used.

use std::path::{Path, PathBuf};

use super::{FontError, FontHandle, FontResult, FontSource};

/// How deep platform font directories are searched for bare file names
const MAX_SEARCH_DEPTH: usize = 4;

/// Resolve the first loadable candidate, or the built-in font
///
/// Never fails. Candidate errors are logged at debug level and skipped.
pub fn resolve_font<S: AsRef<str>>(candidates: &[S], size: u32) -> FontHandle {
    for candidate in candidates {
        let candidate = candidate.as_ref();
        match load_candidate(candidate, size) {
            Ok(font) => {
                log::info!("Using font: {} ({}px)", font.source(), font.size());
                return font;
            }
            Err(e) => log::debug!("Skipping font candidate '{}': {}", candidate, e),
        }
    }

    let font = FontHandle::builtin();
    log::info!(
        "Using default font: {} ({}px), none of {} candidate(s) loaded",
        font.source(),
        font.size(),
        candidates.len()
    );
    font
}

/// Locate, read and parse one candidate at `size` pixels
pub fn load_candidate(candidate: &str, size: u32) -> FontResult<FontHandle> {
    if size == 0 {
        return Err(FontError::UnsupportedSize(size));
    }

    let path = locate_candidate(candidate).ok_or_else(|| FontError::NotFound(candidate.to_string()))?;
    let bytes = std::fs::read(&path).map_err(|source| FontError::Read {
        path: path.clone(),
        source,
    })?;

    FontHandle::from_bytes(&bytes, size, FontSource::File(path))
}

/// Find a candidate on disk
///
/// Paths are used as given. Bare file names (`arial.ttf`) are also looked up
/// in the platform font directories.
pub fn locate_candidate(candidate: &str) -> Option<PathBuf> {
    if candidate.is_empty() {
        return None;
    }

    let path = Path::new(candidate);
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    if path.components().count() != 1 {
        return None;
    }

    font_search_dirs()
        .iter()
        .find_map(|dir| find_in_dir(dir, candidate, MAX_SEARCH_DEPTH))
}

fn find_in_dir(dir: &Path, file_name: &str, depth: usize) -> Option<PathBuf> {
    let direct = dir.join(file_name);
    if direct.is_file() {
        return Some(direct);
    }
    if depth == 0 {
        return None;
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    // read_dir order is platform dependent
    subdirs.sort();

    subdirs
        .iter()
        .find_map(|subdir| find_in_dir(subdir, file_name, depth - 1))
}

/// Platform font directories, most specific first
pub fn font_search_dirs() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut dirs = Vec::new();

    if cfg!(windows) {
        let windir = std::env::var_os("WINDIR").map_or_else(|| PathBuf::from("C:\\Windows"), PathBuf::from);
        dirs.push(windir.join("Fonts"));
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft").join("Windows").join("Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        if let Some(home) = &home {
            dirs.push(home.join("Library/Fonts"));
        }
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
    } else {
        if let Some(data_home) = std::env::var_os("XDG_DATA_HOME") {
            dirs.push(PathBuf::from(data_home).join("fonts"));
        }
        if let Some(home) = &home {
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        dirs.push(PathBuf::from("/usr/share/fonts"));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_candidates_missing_falls_back() {
        let font = resolve_font(&["/definitely/not/here.ttf", "no-such-font-anywhere.ttf", ""], 32);
        assert!(font.is_builtin());
        assert_eq!(font.source(), &FontSource::BuiltIn);
        assert!(!font.rasterize('W').is_empty());
    }

    #[test]
    fn test_first_loadable_candidate_wins() {
        let path = crate::tests::test_font_path();
        let fixture = path.to_str().unwrap();

        let font = resolve_font(&["/definitely/not/here.ttf", fixture, "also-missing.ttf"], 24);
        assert!(!font.is_builtin());
        assert_eq!(font.source(), &FontSource::File(path.clone()));
        assert_eq!(font.size(), 24);
        assert!(!font.rasterize('W').is_empty());
    }

    #[test]
    fn test_empty_candidate_list_falls_back() {
        let candidates: [&str; 0] = [];
        assert!(resolve_font(&candidates, 20).is_builtin());
    }

    #[test]
    fn test_unparsable_candidate_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"this is not a font").unwrap();

        let err = load_candidate(bogus.to_str().unwrap(), 16).unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));

        let font = resolve_font(&[bogus.to_str().unwrap()], 16);
        assert!(font.is_builtin());
    }

    #[test]
    fn test_missing_candidate_is_not_found() {
        let err = load_candidate("/nope/missing.ttf", 16).unwrap_err();
        assert!(matches!(err, FontError::NotFound(_)));
    }

    #[test]
    fn test_zero_size_candidate_rejected() {
        let err = load_candidate("anything.ttf", 0).unwrap_err();
        assert!(matches!(err, FontError::UnsupportedSize(0)));
    }

    #[test]
    fn test_locate_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.ttf");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(locate_candidate(path.to_str().unwrap()), Some(path));
    }

    #[test]
    fn test_find_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("truetype").join("family");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("Face.ttf"), b"x").unwrap();

        assert_eq!(find_in_dir(dir.path(), "Face.ttf", 2), Some(nested.join("Face.ttf")));
        assert_eq!(find_in_dir(dir.path(), "Face.ttf", 1), None);
    }

    #[test]
    fn test_search_dirs_not_empty() {
        assert!(!font_search_dirs().is_empty());
    }
}
