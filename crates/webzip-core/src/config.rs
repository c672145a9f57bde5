//! Configuration for packaging operations.

use crate::PackError;
use crate::Result;
use crate::repack::RepackTool;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Directory that is packaged when no root is given.
pub const DEFAULT_ROOT: &str = ".";

/// Final archive location relative to the current directory.
pub const DEFAULT_OUTPUT: &str = ".builds/web/game.zip";

/// File name of the store-only archive handed to the repack tool.
pub const DEFAULT_INTERMEDIATE_NAME: &str = "game2.zip";

/// Directory every archive entry is placed under.
pub const DEFAULT_VIRTUAL_ROOT: &str = "demo";

/// Top-level names left out of the archive.
pub const DEFAULT_EXCLUDED_NAMES: [&str; 4] = ["lib", ".godot", ".builds", "zip.py"];

/// Configuration for a packaging run.
///
/// The defaults reproduce the layout of a Godot web export: the project root
/// is the current directory, the archive lands in `.builds/web/game.zip`, and
/// the build tooling directories are excluded.
///
/// # Examples
///
/// ```
/// use webzip_core::PackageConfig;
///
/// let config = PackageConfig::default()
///     .with_root("./project")
///     .with_virtual_root("game")
///     .with_repack(None);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.intermediate_path(), config.output);
/// ```
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Directory whose contents are packaged.
    ///
    /// Default: `.`.
    pub root: PathBuf,

    /// Path of the final archive.
    ///
    /// Default: `.builds/web/game.zip`.
    pub output: PathBuf,

    /// File name of the store-only archive, created next to `output`.
    ///
    /// Only used when `repack` is set.
    ///
    /// Default: `game2.zip`.
    pub intermediate_name: String,

    /// Single path component prepended to every entry inside the archive.
    ///
    /// Default: `demo`.
    pub virtual_root: String,

    /// Names removed from the direct children of `root`.
    ///
    /// Matching is exact and case-sensitive. Nested entries with the same
    /// name are kept.
    ///
    /// Default: `["lib", ".godot", ".builds", "zip.py"]`.
    pub excluded_names: Vec<String>,

    /// Tool used to re-compress the store-only archive.
    ///
    /// `None` writes the store-only archive directly to `output`.
    ///
    /// Default: WinRAR (`WinRAR.exe`).
    pub repack: Option<RepackTool>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            intermediate_name: DEFAULT_INTERMEDIATE_NAME.to_string(),
            virtual_root: DEFAULT_VIRTUAL_ROOT.to_string(),
            excluded_names: DEFAULT_EXCLUDED_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            repack: Some(RepackTool::default()),
        }
    }
}

impl PackageConfig {
    /// Creates a new `PackageConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the final archive path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the intermediate archive file name.
    #[must_use]
    pub fn with_intermediate_name(mut self, name: impl Into<String>) -> Self {
        self.intermediate_name = name.into();
        self
    }

    /// Sets the virtual root directory name.
    #[must_use]
    pub fn with_virtual_root(mut self, name: impl Into<String>) -> Self {
        self.virtual_root = name.into();
        self
    }

    /// Replaces the excluded top-level names.
    #[must_use]
    pub fn with_excluded_names(mut self, names: Vec<String>) -> Self {
        self.excluded_names = names;
        self
    }

    /// Sets the repack tool, or disables repacking with `None`.
    #[must_use]
    pub fn with_repack(mut self, tool: Option<RepackTool>) -> Self {
        self.repack = tool;
        self
    }

    /// Directory the repack tool runs in.
    ///
    /// This is the parent of `output`, or `.` when `output` is a bare file
    /// name.
    pub fn work_dir(&self) -> PathBuf {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Path the store-only archive is written to.
    pub fn intermediate_path(&self) -> PathBuf {
        if self.repack.is_some() {
            self.work_dir().join(&self.intermediate_name)
        } else {
            self.output.clone()
        }
    }

    /// Directory the repack tool extracts into.
    pub fn extraction_dir(&self) -> PathBuf {
        self.work_dir().join(&self.virtual_root)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `virtual_root` or `intermediate_name` is not a single normal path
    ///   component
    /// - `output` has no file name
    /// - the intermediate archive would overwrite the final archive
    pub fn validate(&self) -> Result<()> {
        require_single_component("virtual root", &self.virtual_root)?;

        let Some(output_name) = self.output.file_name() else {
            return Err(PackError::InvalidConfig {
                reason: format!("output path has no file name: {}", self.output.display()),
            });
        };

        if self.repack.is_some() {
            require_single_component("intermediate archive name", &self.intermediate_name)?;

            if output_name == self.intermediate_name.as_str() {
                return Err(PackError::InvalidConfig {
                    reason: format!(
                        "intermediate archive '{}' would overwrite the output",
                        self.intermediate_name
                    ),
                });
            }

            if output_name == self.virtual_root.as_str() {
                return Err(PackError::InvalidConfig {
                    reason: format!(
                        "output '{}' collides with the extraction directory",
                        self.output.display()
                    ),
                });
            }
        }

        Ok(())
    }
}

fn require_single_component(what: &str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains(['/', '\\']) => Ok(()),
        _ => Err(PackError::InvalidConfig {
            reason: format!("{what} must be a single file name, got '{value}'"),
        }),
    }
}
