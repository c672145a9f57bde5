//! Common trait for repack tools.

use crate::Result;
use crate::report::ToolRun;
use std::path::Path;

/// An archiving tool able to unpack a zip and build a compressed zip from a
/// directory.
///
/// All paths except `work_dir` are relative to `work_dir`, which is where the
/// tool operates.
pub trait ArchiveTool {
    /// Short name for messages.
    fn name(&self) -> &str;

    /// Unpacks `archive` into `work_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be run at all. A tool that runs and
    /// fails is reported through the returned `ToolRun`.
    fn extract(&self, archive: &Path, work_dir: &Path) -> Result<ToolRun>;

    /// Builds `output` from `source_dir`, keeping `source_dir` as the top-level
    /// directory of every entry.
    ///
    /// # Errors
    ///
    /// Same contract as [`ArchiveTool::extract`].
    fn compress(&self, source_dir: &Path, output: &Path, work_dir: &Path) -> Result<ToolRun>;
}
