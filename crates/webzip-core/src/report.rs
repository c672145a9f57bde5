//! Packaging operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a packaging run.
///
/// # Examples
///
/// ```
/// use webzip_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.intermediate_size = 1000;
/// report.archive_size = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of files written into the store-only archive.
    pub files_added: usize,

    /// Total file bytes written into the store-only archive.
    pub bytes_written: u64,

    /// Top-level entries left out by the exclusion list.
    pub entries_excluded: Vec<PathBuf>,

    /// Size of the store-only archive in bytes.
    pub intermediate_size: u64,

    /// Size of the final archive in bytes.
    pub archive_size: u64,

    /// Invocations of the repack tool, in order.
    pub tool_runs: Vec<ToolRun>,

    /// Duration of the whole run.
    pub duration: Duration,

    /// Warnings generated during the run.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns whether the archive was repacked by a tool.
    #[must_use]
    pub fn was_repacked(&self) -> bool {
        !self.tool_runs.is_empty()
    }

    /// Returns the ratio of store-only size to final size.
    ///
    /// Returns 0.0 if either size is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.intermediate_size == 0 {
            return 0.0;
        }
        self.intermediate_size as f64 / self.archive_size as f64
    }

    /// Returns the space saved by repacking as a percentage.
    ///
    /// Returns 0.0 if the store-only size is 0 or the final archive grew.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.intermediate_size == 0 || self.archive_size >= self.intermediate_size {
            return 0.0;
        }
        (1.0 - self.archive_size as f64 / self.intermediate_size as f64) * 100.0
    }
}

/// Stage of the repack step a tool invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStep {
    /// Unpacking the store-only archive.
    Extract,
    /// Building the final archive from the unpacked tree.
    Compress,
}

impl ToolStep {
    /// Lowercase name for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Compress => "compress",
        }
    }
}

impl std::fmt::Display for ToolStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one repack tool invocation.
///
/// The exit status is recorded but never turned into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRun {
    /// Which stage ran.
    pub step: ToolStep,

    /// Process exit code; `None` for in-process tools or signal termination.
    pub exit_code: Option<i32>,

    /// Whether the tool reported success.
    pub success: bool,

    /// Trimmed stderr of a failed run, if any.
    pub stderr: Option<String>,
}

impl ToolRun {
    /// A successful run without a process exit code.
    #[must_use]
    pub const fn in_process(step: ToolStep) -> Self {
        Self {
            step,
            exit_code: None,
            success: true,
            stderr: None,
        }
    }
}

/// Callback trait for progress reporting while the archive is written.
///
/// Implement this trait to receive progress updates during packaging.
/// All methods are called synchronously on the packaging thread.
pub trait ProgressCallback: Send {
    /// Called when starting to write an entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Archive path of the entry
    /// * `total` - Total number of entries
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of file data written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the repack tool is about to run a step.
    fn on_tool_step(&mut self, _step: ToolStep) {}

    /// Called when the entire run is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_warnings() {
        let mut report = PackReport::new();
        assert!(!report.has_warnings());

        report.add_warning("extraction directory missing");
        assert!(report.has_warnings());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_compression_edge_cases() {
        let mut report = PackReport::new();
        assert!((report.compression_ratio() - 0.0).abs() < f64::EPSILON);
        assert!((report.compression_percentage() - 0.0).abs() < f64::EPSILON);

        report.intermediate_size = 100;
        report.archive_size = 120;
        assert!((report.compression_percentage() - 0.0).abs() < f64::EPSILON);
        assert!(report.compression_ratio() < 1.0);
    }

    #[test]
    fn test_was_repacked() {
        let mut report = PackReport::new();
        assert!(!report.was_repacked());

        report.tool_runs.push(ToolRun::in_process(ToolStep::Extract));
        assert!(report.was_repacked());
    }

    #[test]
    fn test_tool_step_display() {
        assert_eq!(ToolStep::Extract.to_string(), "extract");
        assert_eq!(ToolStep::Compress.to_string(), "compress");
    }

    #[test]
    fn test_noop_progress() {
        let mut progress = NoopProgress;
        progress.on_entry_start(Path::new("demo/index.html"), 1, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete(Path::new("demo/index.html"));
        progress.on_tool_step(ToolStep::Compress);
        progress.on_complete();
    }
}
