//! In-process repacking with the `zip` crate.
//!
//! Stands in for the external archiver on hosts that do not have one. The
//! result matches what WinRAR produces with `-afzip -ep1`: the source
//! directory name is the top-level folder and file data is Deflate-compressed.

use crate::Result;
use crate::packaging::zip::normalize_zip_path;
use crate::repack::traits::ArchiveTool;
use crate::report::ToolRun;
use crate::report::ToolStep;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Default Deflate level, balanced between speed and size.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Repacks without spawning a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTool {
    compression_level: u8,
}

impl Default for BuiltinTool {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl BuiltinTool {
    /// Creates a builtin tool with the given Deflate level, clamped to 1-9.
    #[must_use]
    pub fn with_compression_level(level: u8) -> Self {
        Self {
            compression_level: level.clamp(1, 9),
        }
    }

    /// Deflate level used for the final archive.
    #[must_use]
    pub const fn compression_level(&self) -> u8 {
        self.compression_level
    }
}

impl ArchiveTool for BuiltinTool {
    fn name(&self) -> &str {
        "builtin"
    }

    fn extract(&self, archive: &Path, work_dir: &Path) -> Result<ToolRun> {
        let file = File::open(work_dir.join(archive))?;
        let mut zip = ZipArchive::new(file)?;
        zip.extract(work_dir)?;
        Ok(ToolRun::in_process(ToolStep::Extract))
    }

    fn compress(&self, source_dir: &Path, output: &Path, work_dir: &Path) -> Result<ToolRun> {
        let file = File::create(work_dir.join(output))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));

        let file_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(self.compression_level)));
        let dir_options = SimpleFileOptions::default();

        for entry in WalkDir::new(work_dir.join(source_dir)).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::other)?;
            let relative = entry.path().strip_prefix(work_dir).map_err(|_| {
                std::io::Error::other(format!(
                    "{} escaped the work directory",
                    entry.path().display()
                ))
            })?;
            let name = normalize_zip_path(relative)?;

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{name}/"), dir_options)?;
            } else if entry.file_type().is_file() {
                zip.start_file(name.as_str(), file_options)?;
                let mut source = File::open(entry.path())?;
                std::io::copy(&mut source, &mut zip)?;
            }
        }

        zip.finish()?.flush()?;
        Ok(ToolRun::in_process(ToolStep::Compress))
    }
}
