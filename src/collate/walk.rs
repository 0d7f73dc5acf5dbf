//! Directory tree walker producing flat, typed listings.

use std::io;
use std::path::Path;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::collate::{CollateError, FileRecord};

/// List all files and directories under `root` as a flat sequence of records.
///
/// The root itself is not included.
/// Without `recursive` only the immediate children are listed.
/// With `recursive` the listing is flattened depth-first;
/// there is no ordering guarantee across siblings beyond the underlying directory-read order.
///
/// Symlinks are reported with the type of the link itself and never followed.
///
/// # Errors
/// Returns [`CollateError::NotADirectory`] if `root` is not a directory,
/// or an I/O error if an entry cannot be read.
pub fn walk(root: &Path, recursive: bool) -> Result<Vec<FileRecord>, CollateError> {
    if !root.is_dir() {
        return Err(CollateError::NotADirectory(root.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(io::Error::from)?;

    // Directory reads above are sequential; the per-entry stat calls are not.
    entries
        .par_iter()
        .map(|entry| -> Result<FileRecord, CollateError> {
            let metadata = entry.metadata().map_err(io::Error::from)?;
            Ok(FileRecord::from_metadata(entry.path(), &metadata))
        })
        .collect()
}

/// List files under `root`, filtering directories out of the walked listing.
///
/// # Errors
/// Fails when `root` cannot be walked.
pub fn list_files(root: &Path, recursive: bool) -> Result<Vec<FileRecord>, CollateError> {
    Ok(walk(root, recursive)?
        .into_iter()
        .filter(|record| !record.is_directory)
        .collect())
}

/// List directories under `root`, filtering files out of the walked listing.
///
/// # Errors
/// Fails when `root` cannot be walked.
pub fn list_directories(root: &Path, recursive: bool) -> Result<Vec<FileRecord>, CollateError> {
    Ok(walk(root, recursive)?
        .into_iter()
        .filter(|record| record.is_directory)
        .collect())
}
