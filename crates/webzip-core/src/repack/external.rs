//! Repacking through an external archiver process.

use crate::PackError;
use crate::Result;
use crate::repack::ToolFlavor;
use crate::repack::traits::ArchiveTool;
use crate::report::ToolRun;
use crate::report::ToolStep;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

/// An archiver invoked as a child process.
///
/// Each step blocks until the process exits. The exit status is recorded in
/// the returned `ToolRun` and is never treated as an error; only a failure to
/// start the process is.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use webzip_core::repack::ExternalTool;
///
/// let tool = ExternalTool::winrar("WinRAR.exe");
/// let args = tool.compress_args(Path::new("demo"), Path::new("game.zip"));
/// assert_eq!(args, ["a", "-afzip", "-ep1", "./game.zip", "./demo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    program: String,
    flavor: ToolFlavor,
}

impl ExternalTool {
    /// Creates a tool running `program` with the command-line dialect of
    /// `flavor`.
    #[must_use]
    pub fn new(program: impl Into<String>, flavor: ToolFlavor) -> Self {
        Self {
            program: program.into(),
            flavor,
        }
    }

    /// WinRAR command-line dialect.
    #[must_use]
    pub fn winrar(program: impl Into<String>) -> Self {
        Self::new(program, ToolFlavor::WinRar)
    }

    /// 7-Zip command-line dialect.
    #[must_use]
    pub fn seven_zip(program: impl Into<String>) -> Self {
        Self::new(program, ToolFlavor::SevenZip)
    }

    /// Program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for unpacking `archive` into the working directory.
    #[must_use]
    pub fn extract_args(&self, archive: &Path) -> Vec<OsString> {
        let archive = dot_relative(archive);
        match self.flavor {
            ToolFlavor::WinRar => vec!["x".into(), archive, "./".into()],
            ToolFlavor::SevenZip => vec!["x".into(), archive, "-o./".into(), "-y".into()],
        }
    }

    /// Arguments for building `output` from `source_dir`.
    #[must_use]
    pub fn compress_args(&self, source_dir: &Path, output: &Path) -> Vec<OsString> {
        let output = dot_relative(output);
        let source_dir = dot_relative(source_dir);
        match self.flavor {
            ToolFlavor::WinRar => vec![
                "a".into(),
                "-afzip".into(),
                "-ep1".into(),
                output,
                source_dir,
            ],
            ToolFlavor::SevenZip => vec!["a".into(), "-tzip".into(), output, source_dir],
        }
    }

    fn run(&self, step: ToolStep, args: &[OsString], work_dir: &Path) -> Result<ToolRun> {
        let output = Command::new(resolve_program(&self.program))
            .args(args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| PackError::ToolSpawn {
                program: self.program.clone(),
                source,
            })?;

        let success = output.status.success();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        Ok(ToolRun {
            step,
            exit_code: output.status.code(),
            success,
            stderr: (!success && !stderr.is_empty()).then_some(stderr),
        })
    }
}

impl ArchiveTool for ExternalTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn extract(&self, archive: &Path, work_dir: &Path) -> Result<ToolRun> {
        self.run(ToolStep::Extract, &self.extract_args(archive), work_dir)
    }

    fn compress(&self, source_dir: &Path, output: &Path, work_dir: &Path) -> Result<ToolRun> {
        self.run(
            ToolStep::Compress,
            &self.compress_args(source_dir, output),
            work_dir,
        )
    }
}

/// Prefixes a relative path with `./` so the tool never reads it as a switch.
fn dot_relative(path: &Path) -> OsString {
    if path.is_absolute() {
        path.as_os_str().to_owned()
    } else {
        Path::new(".").join(path).into_os_string()
    }
}

/// Anchors a relative program path like `tools/rar` to the current directory.
///
/// The child runs in the work directory, where such a path would resolve
/// differently. Bare names are left for `PATH` lookup.
fn resolve_program(program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative()
        && path.components().count() > 1
        && let Ok(cwd) = std::env::current_dir()
    {
        return cwd.join(path);
    }
    path.to_path_buf()
}
