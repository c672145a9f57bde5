//! Name filtering and archive path computation.
//!
//! Exclusion is deliberately shallow: a name in the exclusion list removes a
//! direct child of the root, while a nested directory with the same name is
//! archived like any other.

use crate::PackError;
use crate::Result;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;

/// Checks whether `name` is one of the excluded names.
///
/// Matching is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use std::ffi::OsStr;
/// use webzip_core::packaging::filters;
///
/// let excluded = vec!["lib".to_string(), ".godot".to_string()];
/// assert!(filters::is_excluded_name(OsStr::new("lib"), &excluded));
/// assert!(!filters::is_excluded_name(OsStr::new("lib2"), &excluded));
/// assert!(!filters::is_excluded_name(OsStr::new("Lib"), &excluded));
/// ```
#[must_use]
pub fn is_excluded_name(name: &OsStr, excluded: &[String]) -> bool {
    excluded.iter().any(|candidate| name == candidate.as_str())
}

/// Checks whether a walked entry is removed by the top-level exclusion.
///
/// `depth` is the walk depth of the entry: the root itself is 0 and its
/// direct children are 1. Only depth 1 is ever excluded.
///
/// # Examples
///
/// ```
/// use std::ffi::OsStr;
/// use webzip_core::packaging::filters;
///
/// let excluded = vec!["lib".to_string()];
/// assert!(filters::is_top_level_excluded(1, OsStr::new("lib"), &excluded));
/// assert!(!filters::is_top_level_excluded(2, OsStr::new("lib"), &excluded));
/// ```
#[must_use]
pub fn is_top_level_excluded(depth: usize, name: &OsStr, excluded: &[String]) -> bool {
    depth == 1 && is_excluded_name(name, excluded)
}

/// Computes the archive path of `path`: `virtual_root` joined with the path
/// relative to `root`.
///
/// # Errors
///
/// Returns `InvalidPath` if `path` is not under `root`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use webzip_core::packaging::filters;
///
/// let archive_path =
///     filters::compute_archive_path(Path::new("./assets/logo.png"), Path::new("."), "demo")?;
/// assert_eq!(archive_path, Path::new("demo/assets/logo.png"));
/// # Ok::<(), webzip_core::PackError>(())
/// ```
pub fn compute_archive_path(path: &Path, root: &Path, virtual_root: &str) -> Result<PathBuf> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackError::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("not under root {}", root.display()),
        })?;

    Ok(Path::new(virtual_root).join(relative))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_is_excluded_name_exact() {
        let excluded = names(&["lib", ".godot", ".builds", "zip.py"]);
        assert!(is_excluded_name(OsStr::new("lib"), &excluded));
        assert!(is_excluded_name(OsStr::new(".godot"), &excluded));
        assert!(is_excluded_name(OsStr::new(".builds"), &excluded));
        assert!(is_excluded_name(OsStr::new("zip.py"), &excluded));
    }

    #[test]
    fn test_is_excluded_name_no_partial_match() {
        let excluded = names(&["lib", ".godot"]);
        assert!(!is_excluded_name(OsStr::new("libs"), &excluded));
        assert!(!is_excluded_name(OsStr::new("mylib"), &excluded));
        assert!(!is_excluded_name(OsStr::new(".godot.bak"), &excluded));
        assert!(!is_excluded_name(OsStr::new("LIB"), &excluded));
    }

    #[test]
    fn test_is_excluded_name_empty_list() {
        assert!(!is_excluded_name(OsStr::new("lib"), &[]));
    }

    #[test]
    fn test_top_level_only() {
        let excluded = names(&["lib"]);
        assert!(!is_top_level_excluded(0, OsStr::new("lib"), &excluded));
        assert!(is_top_level_excluded(1, OsStr::new("lib"), &excluded));
        assert!(!is_top_level_excluded(2, OsStr::new("lib"), &excluded));
        assert!(!is_top_level_excluded(5, OsStr::new("lib"), &excluded));
    }

    #[test]
    fn test_compute_archive_path_basic() {
        let root = Path::new("/home/user/game");
        let source = Path::new("/home/user/game/index.html");

        let result = compute_archive_path(source, root, "demo").unwrap();
        assert_eq!(result, Path::new("demo/index.html"));
    }

    #[test]
    fn test_compute_archive_path_nested() {
        let root = Path::new("/home/user/game");
        let source = Path::new("/home/user/game/assets/lib/sound.ogg");

        let result = compute_archive_path(source, root, "demo").unwrap();
        assert_eq!(result, Path::new("demo/assets/lib/sound.ogg"));
    }

    #[test]
    fn test_compute_archive_path_current_dir_root() {
        let result = compute_archive_path(Path::new("./main.wasm"), Path::new("."), "demo").unwrap();
        assert_eq!(result, Path::new("demo/main.wasm"));
    }

    #[test]
    fn test_compute_archive_path_not_under_root() {
        let root = Path::new("/home/user/game");
        let source = Path::new("/home/other/file.txt");

        let result = compute_archive_path(source, root, "demo");
        assert!(matches!(result, Err(PackError::InvalidPath { .. })));
    }
}
