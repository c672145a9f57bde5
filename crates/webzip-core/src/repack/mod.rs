//! Re-compressing the store-only archive.
//!
//! The repack step hands the store-only archive to an archiving tool, which
//! unpacks it next to the output and builds the final archive from the
//! unpacked tree. Afterwards the store-only archive and the unpacked tree are
//! removed.
//!
//! Tool exit codes are recorded in the report as warnings and never abort the
//! run.

pub mod builtin;
pub mod external;
pub mod traits;

pub use builtin::BuiltinTool;
pub use external::ExternalTool;
pub use traits::ArchiveTool;

use crate::PackError;
use crate::PackageConfig;
use crate::ProgressCallback;
use crate::Result;
use crate::report::PackReport;
use crate::report::ToolRun;
use crate::report::ToolStep;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Program used by the default configuration.
pub const DEFAULT_TOOL_PROGRAM: &str = "WinRAR.exe";

/// Command-line dialect of an external archiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolFlavor {
    /// `WinRAR.exe` / `rar`.
    #[default]
    WinRar,
    /// `7z` / `7za`.
    SevenZip,
}

/// Which tool performs the repack step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepackTool {
    /// Spawn an external archiver.
    External {
        /// Program name (looked up on `PATH`) or path.
        program: String,
        /// Command-line dialect of the program.
        flavor: ToolFlavor,
    },
    /// Repack in-process with the `zip` crate.
    Builtin,
}

impl Default for RepackTool {
    fn default() -> Self {
        Self::External {
            program: DEFAULT_TOOL_PROGRAM.to_string(),
            flavor: ToolFlavor::WinRar,
        }
    }
}

impl RepackTool {
    /// Instantiates the tool.
    #[must_use]
    pub fn build(&self) -> Box<dyn ArchiveTool> {
        match self {
            Self::External { program, flavor } => Box::new(ExternalTool::new(program, *flavor)),
            Self::Builtin => Box::new(BuiltinTool::default()),
        }
    }
}

/// Runs the repack step for an already written store-only archive.
///
/// Steps, in order:
/// 1. Remove a stale extraction directory left by an earlier run
/// 2. Extract the store-only archive into the work directory
/// 3. Remove a stale final archive so the tool creates it afresh
/// 4. Compress the extraction directory into the final archive
/// 5. Remove the store-only archive and the extraction directory
///
/// # Errors
///
/// Returns an error if the tool cannot be started or a filesystem operation
/// fails. A tool that exits with a failure status is only recorded.
pub fn repackage(
    tool: &dyn ArchiveTool,
    config: &PackageConfig,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let work_dir = config.work_dir();
    let extraction_dir = config.extraction_dir();
    let intermediate = config.intermediate_path();
    let output_name = config
        .output
        .file_name()
        .ok_or_else(|| PackError::InvalidConfig {
            reason: format!("output path has no file name: {}", config.output.display()),
        })?;

    if extraction_dir.exists() {
        fs::remove_dir_all(&extraction_dir)?;
        report.add_warning(format!(
            "Removed stale extraction directory: {}",
            extraction_dir.display()
        ));
    }

    progress.on_tool_step(ToolStep::Extract);
    let run = tool.extract(Path::new(&config.intermediate_name), &work_dir)?;
    record_run(tool, run, report);

    if config.output.exists() {
        fs::remove_file(&config.output)?;
    }

    progress.on_tool_step(ToolStep::Compress);
    let run = tool.compress(
        Path::new(&config.virtual_root),
        Path::new(output_name),
        &work_dir,
    )?;
    record_run(tool, run, report);

    fs::remove_file(&intermediate)?;
    match fs::remove_dir_all(&extraction_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            report.add_warning(format!(
                "Extraction directory was not created: {}",
                extraction_dir.display()
            ));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn record_run(tool: &dyn ArchiveTool, run: ToolRun, report: &mut PackReport) {
    if !run.success {
        let status = run
            .exit_code
            .map_or_else(|| "a signal".to_string(), |code| format!("code {code}"));
        let mut message = format!("{} {} exited with {status}", tool.name(), run.step);
        if let Some(stderr) = &run.stderr {
            message.push_str(": ");
            message.push_str(stderr);
        }
        report.add_warning(message);
    }
    report.tool_runs.push(run);
}
