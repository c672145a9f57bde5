//! Building the store-only archive from a build directory.
//!
//! Packaging is a single traversal of the root directory followed by one
//! sequential write of every collected file into a zip using the `Stored`
//! method.

pub mod filters;
pub mod walker;
pub mod zip;

pub use walker::FilteredEntry;
pub use walker::FilteredWalker;
pub use walker::collect_entries;
pub use self::zip::create_stored_zip;
pub use self::zip::write_stored_zip;
