//! Directory tree walking with top-level exclusion.

use crate::PackError;
use crate::Result;
use crate::packaging::filters;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks a build directory and yields the files to archive.
///
/// The walker:
/// - Prunes direct children of the root whose name is excluded
/// - Descends into every other directory without further filtering
/// - Does not follow directory symlinks
/// - Yields regular files and symlinks to regular files
/// - Fails on symlinks whose target cannot be read
/// - Visits entries in file-name order
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use webzip_core::packaging::FilteredWalker;
///
/// let excluded = vec!["lib".to_string()];
/// let walker = FilteredWalker::new(Path::new("."), &excluded, "demo");
///
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("Would add: {}", entry.archive_path.display());
/// }
/// # Ok::<(), webzip_core::PackError>(())
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    excluded: &'a [String],
    virtual_root: &'a str,
    skip: Vec<PathBuf>,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker for `root`.
    #[must_use]
    pub fn new(root: &'a Path, excluded: &'a [String], virtual_root: &'a str) -> Self {
        Self {
            root,
            excluded,
            virtual_root,
            skip: Vec::new(),
        }
    }

    /// Never yields `path`, even when it lies under the root and is not
    /// excluded.
    ///
    /// Used for the archives the run itself writes. Paths that do not exist
    /// yet cannot be encountered and are ignored.
    #[must_use]
    pub fn skipping(mut self, path: &Path) -> Self {
        if let Ok(canonical) = fs::canonicalize(path) {
            self.skip.push(canonical);
        }
        self
    }

    /// Returns an iterator over the files to archive.
    ///
    /// # Errors
    ///
    /// Entries may error if a directory cannot be read or file metadata
    /// cannot be obtained.
    pub fn walk(&self) -> impl Iterator<Item = Result<FilteredEntry>> + '_ {
        let excluded = self.excluded;

        WalkDir::new(self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                !filters::is_top_level_excluded(entry.depth(), entry.file_name(), excluded)
            })
            .filter_map(move |entry| match entry {
                Ok(entry) => self.build_filtered_entry(&entry).transpose(),
                Err(e) => Some(Err(PackError::Io(std::io::Error::other(format!(
                    "walkdir error: {e}"
                ))))),
            })
    }

    /// Builds a `FilteredEntry`, or `Ok(None)` for entries that are not
    /// archived (directories, directory symlinks, skipped paths).
    fn build_filtered_entry(&self, entry: &DirEntry) -> Result<Option<FilteredEntry>> {
        let path = entry.path();
        let file_type = entry.file_type();

        let size = if file_type.is_file() {
            entry
                .metadata()
                .map_err(|e| {
                    PackError::Io(std::io::Error::other(format!(
                        "cannot read metadata for {}: {e}",
                        path.display()
                    )))
                })?
                .len()
        } else if file_type.is_symlink() {
            let target = fs::metadata(path).map_err(|e| {
                PackError::Io(std::io::Error::new(
                    e.kind(),
                    format!("cannot read symlink target of {}: {e}", path.display()),
                ))
            })?;
            if target.is_dir() {
                return Ok(None);
            }
            target.len()
        } else {
            return Ok(None);
        };

        if self.is_skipped(path) {
            return Ok(None);
        }

        let archive_path = filters::compute_archive_path(path, self.root, self.virtual_root)?;

        Ok(Some(FilteredEntry {
            path: path.to_path_buf(),
            archive_path,
            size,
        }))
    }

    fn is_skipped(&self, path: &Path) -> bool {
        if self.skip.is_empty() {
            return false;
        }
        fs::canonicalize(path).is_ok_and(|canonical| self.skip.contains(&canonical))
    }
}

/// A file chosen for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntry {
    /// Filesystem path as produced by the walk.
    pub path: PathBuf,

    /// Path inside the archive, starting with the virtual root.
    pub archive_path: PathBuf,

    /// Size in bytes at walk time.
    pub size: u64,
}

/// Collects every file to archive in a single traversal, ordered by archive
/// path.
///
/// Collecting up front means the output archive can be created afterwards
/// without ever being visited by the walk. The walk orders siblings per
/// directory, so the result is re-sorted on the full archive path (`a-b`
/// before `a/x`).
///
/// # Errors
///
/// Returns an error if:
/// - `root` does not exist or is not a directory
/// - Directory traversal fails
/// - File metadata cannot be read
pub fn collect_entries(walker: &FilteredWalker<'_>) -> Result<Vec<FilteredEntry>> {
    if !walker.root.is_dir() {
        return Err(PackError::SourceNotFound {
            path: walker.root.to_path_buf(),
        });
    }

    let mut entries = walker.walk().collect::<Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.archive_path.as_os_str().cmp(b.archive_path.as_os_str()));
    Ok(entries)
}

/// Lists the direct children of `root` removed by the exclusion list.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub fn excluded_top_level(root: &Path, excluded: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if filters::is_excluded_name(&entry.file_name(), excluded) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}
