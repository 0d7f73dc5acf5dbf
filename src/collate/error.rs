//! Error types for walking and collation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the tree walker and the collation executor.
///
/// Only a failure to walk the source root is fatal to a whole collation call.
/// Collisions and per-file I/O failures are captured into the affected
/// [`CollationResult`](crate::collate::CollationResult) instead.
#[derive(Debug, Error)]
pub enum CollateError {
    /// The walked root path exists but is not a directory, or does not exist at all.
    #[error("Not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    /// The computed target path is already occupied by an existing filesystem entry.
    #[error("Target already exists: '{}'", .0.display())]
    TargetExists(PathBuf),

    /// Permission, disk, or other unexpected filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
