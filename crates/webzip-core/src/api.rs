//! High-level public API for packaging a build directory.

use crate::NoopProgress;
use crate::PackError;
use crate::PackReport;
use crate::PackageConfig;
use crate::ProgressCallback;
use crate::Result;
use crate::packaging::FilteredWalker;
use crate::packaging::collect_entries;
use crate::packaging::create_stored_zip;
use crate::packaging::filters;
use crate::packaging::walker::excluded_top_level;
use crate::repack::repackage;
use std::fs;
use std::path::Component;
use std::time::Instant;

/// Packages `config.root` into `config.output`.
///
/// Walks the root once, writes every non-excluded file into a store-only
/// archive under the virtual root, then runs the configured repack tool.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The root does not exist or cannot be read
/// - The archive cannot be written
/// - The repack tool cannot be started
///
/// # Examples
///
/// ```no_run
/// use webzip_core::PackageConfig;
/// use webzip_core::package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = package(&PackageConfig::default())?;
/// println!("Packaged {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn package(config: &PackageConfig) -> Result<PackReport> {
    package_with_progress(config, &mut NoopProgress)
}

/// Packages `config.root` into `config.output` with progress reporting.
///
/// # Errors
///
/// Same as [`package`].
pub fn package_with_progress(
    config: &PackageConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();
    config.validate()?;

    if !config.root.is_dir() {
        return Err(PackError::SourceNotFound {
            path: config.root.clone(),
        });
    }
    if config.repack.is_some() {
        guard_extraction_dir(config)?;
    }

    let mut report = PackReport::new();
    let intermediate = config.intermediate_path();

    let walker = FilteredWalker::new(&config.root, &config.excluded_names, &config.virtual_root)
        .skipping(&config.output)
        .skipping(&intermediate);
    let entries = collect_entries(&walker)?;
    report.entries_excluded = excluded_top_level(&config.root, &config.excluded_names)?;

    create_stored_zip(&intermediate, &entries, &mut report, progress)?;

    if let Some(repack) = &config.repack {
        let tool = repack.build();
        repackage(tool.as_ref(), config, &mut report, progress)?;
    }

    match fs::metadata(&config.output) {
        Ok(metadata) => report.archive_size = metadata.len(),
        Err(_) => report.add_warning(format!(
            "Output archive was not produced: {}",
            config.output.display()
        )),
    }

    report.duration = start.elapsed();
    progress.on_complete();

    Ok(report)
}

/// Refuses to run when the extraction directory already exists inside the
/// packaged tree, since the repack step deletes it.
///
/// Directories under an excluded top-level name are never packaged and are
/// allowed.
fn guard_extraction_dir(config: &PackageConfig) -> Result<()> {
    let (Ok(extraction), Ok(root)) = (
        fs::canonicalize(config.extraction_dir()),
        fs::canonicalize(&config.root),
    ) else {
        return Ok(());
    };

    let Ok(relative) = extraction.strip_prefix(&root) else {
        return Ok(());
    };

    let excluded = match relative.components().next() {
        Some(Component::Normal(first)) => filters::is_excluded_name(first, &config.excluded_names),
        _ => false,
    };

    if excluded {
        Ok(())
    } else {
        Err(PackError::InvalidConfig {
            reason: format!(
                "extraction directory {} lies inside the packaged tree and would be deleted",
                config.extraction_dir().display()
            ),
        })
    }
}
