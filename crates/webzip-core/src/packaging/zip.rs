//! Store-only ZIP writing.
//!
//! Every entry is written with `CompressionMethod::Stored`; compression is left
//! to the repack step.

use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::packaging::walker::FilteredEntry;
use crate::report::PackReport;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Writes `entries` into a store-only ZIP at `output`.
///
/// The output file is created (or truncated) and its parent directory is
/// created if missing.
///
/// # Errors
///
/// Returns an error if:
/// - The output file cannot be created
/// - A source file cannot be read
/// - An archive path is not valid UTF-8
pub fn create_stored_zip(
    output: &Path,
    entries: &[FilteredEntry],
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output)?;
    let file = write_stored_zip(file, entries, report, progress)?;
    report.intermediate_size = file.metadata()?.len();
    Ok(())
}

/// Writes `entries` into a store-only ZIP on any seekable writer and returns
/// the writer.
///
/// # Errors
///
/// Returns an error if a source file cannot be read or the ZIP cannot be
/// written.
pub fn write_stored_zip<W: Write + Seek>(
    writer: W,
    entries: &[FilteredEntry],
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let total = entries.len();

    // Reused across entries.
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        progress.on_entry_start(&entry.archive_path, total, idx + 1);
        add_file(&mut zip, entry, options, report, progress, &mut buffer)?;
        progress.on_entry_complete(&entry.archive_path);
    }

    let writer = zip.finish()?;
    Ok(writer)
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &FilteredEntry,
    options: SimpleFileOptions,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<()> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    let file_options = options.large_file(metadata.len() >= u64::from(u32::MAX));

    #[cfg(unix)]
    let file_options = {
        use std::os::unix::fs::PermissionsExt;
        file_options.unix_permissions(metadata.permissions().mode())
    };

    let archive_name = normalize_zip_path(&entry.archive_path)?;
    zip.start_file(archive_name.as_str(), file_options)?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    report.files_added += 1;
    report.bytes_written += bytes_written;

    Ok(())
}

/// Converts a path to ZIP entry form: UTF-8 with forward slashes.
pub(crate) fn normalize_zip_path(path: &Path) -> Result<String> {
    let path_str = path.to_str().ok_or_else(|| PackError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".to_string(),
    })?;

    #[cfg(windows)]
    let normalized = path_str.replace('\\', "/");

    #[cfg(not(windows))]
    let normalized = path_str.to_string();

    Ok(normalized)
}
