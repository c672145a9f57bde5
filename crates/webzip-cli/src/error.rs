//! Error conversion utilities for CLI.
//!
//! Converts webzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use webzip_core::PackError;

/// Converts `PackError` to a user-friendly anyhow error with context
pub fn convert_pack_error(err: PackError, root: &Path) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => {
            anyhow!(
                "Build directory not found: '{}'\n\
                 HINT: Run webzip from the project root or pass --root.",
                path.display()
            )
        }
        PackError::ToolSpawn { program, source } => {
            anyhow!(
                "Could not start archiving tool '{program}': {source}\n\
                 HINT: Put it on PATH, pass --tool with its location, \
                 or use --tool-flavor builtin."
            )
        }
        PackError::InvalidConfig { reason } => {
            anyhow!("Invalid options: {reason}")
        }
        PackError::Io(io_err) => {
            anyhow!(
                "I/O error while packaging '{}': {}",
                root.display(),
                io_err
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error packaging '{}'", root.display())),
    }
}

/// Adds packaging context to a core result
pub fn add_root_context<T>(result: Result<T, PackError>, root: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = PackError::SourceNotFound {
            path: PathBuf::from("/missing/game"),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new("/missing/game")));
        assert!(msg.contains("Build directory not found"));
        assert!(msg.contains("--root"));
    }

    #[test]
    fn test_convert_tool_spawn() {
        let err = PackError::ToolSpawn {
            program: "WinRAR.exe".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new(".")));
        assert!(msg.contains("WinRAR.exe"));
        assert!(msg.contains("HINT"));
        assert!(msg.contains("builtin"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = PackError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = format!("{:?}", convert_pack_error(err, Path::new("project")));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("project"));
    }

    #[test]
    fn test_convert_other_error_keeps_source() {
        let err = PackError::InvalidPath {
            path: PathBuf::from("demo/\u{fffd}"),
            reason: "path is not valid UTF-8".to_string(),
        };
        let msg = format!("{:?}", convert_pack_error(err, Path::new(".")));
        assert!(msg.contains("Error packaging"));
        assert!(msg.contains("not valid UTF-8"));
    }
}
