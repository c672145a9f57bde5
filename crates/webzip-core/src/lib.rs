//! Packages a game web build into a zip archive.
//!
//! `webzip-core` walks a build directory, leaves out a fixed set of top-level
//! development directories, writes every remaining file into a store-only zip
//! under a virtual root directory, and then lets an archiving tool re-compress
//! that zip into the final archive.
//!
//! # Examples
//!
//! ```no_run
//! use webzip_core::PackageConfig;
//! use webzip_core::RepackTool;
//! use webzip_core::package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackageConfig::default().with_repack(Some(RepackTool::Builtin));
//! let report = package(&config)?;
//! println!("Packaged {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod packaging;
pub mod repack;
pub mod report;

pub use api::package;
pub use api::package_with_progress;
pub use config::PackageConfig;
pub use error::PackError;
pub use error::Result;
pub use repack::RepackTool;
pub use repack::ToolFlavor;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;
pub use report::ToolRun;
pub use report::ToolStep;
