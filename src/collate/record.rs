//! Data types describing filesystem entries and collation outcomes.

use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::collate::CollateError;
use crate::{path_to_file_extension_string, path_to_file_stem_string, path_to_filename_string};

/// Immutable snapshot of one filesystem entry taken at walk time.
///
/// Records are created once per walk from a live stat and never mutated.
/// A new walk supersedes them if the tree changes; nothing is cached across calls.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path to the entry.
    pub path: PathBuf,
    /// Final path component.
    pub filename: String,
    /// Filename without the extension.
    pub base_name: String,
    /// Lowercase extension without the leading dot. Empty if the file has none.
    pub extension: String,
    /// Path with the final component removed.
    pub parent_dir: PathBuf,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Size in bytes.
    pub size: u64,
    /// Creation time. Falls back to the modification time on filesystems that do not track it.
    pub created: DateTime<Local>,
    /// Last modification time.
    pub modified: DateTime<Local>,
}

impl FileRecord {
    /// Create a record from a live stat of the given path.
    ///
    /// Symlinks are not followed: a symlink is recorded with the type of the link itself.
    ///
    /// # Errors
    /// Returns an error if the path cannot be stat'd.
    pub fn from_path(path: &Path) -> Result<Self, CollateError> {
        let metadata = path.symlink_metadata()?;
        Ok(Self::from_metadata(path, &metadata))
    }

    pub(crate) fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let modified = metadata.modified().map_or_else(|_| Local::now(), DateTime::from);
        let created = metadata.created().map_or(modified, DateTime::from);
        Self {
            path: path.to_path_buf(),
            filename: path_to_filename_string(path),
            base_name: path_to_file_stem_string(path),
            extension: path_to_file_extension_string(path),
            parent_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            is_directory: metadata.is_dir(),
            size: metadata.len(),
            created,
            modified,
        }
    }
}

/// Decomposed destination path computed for one source file.
///
/// Same shape as [`FileRecord`] but describes the destination.
/// Computed fresh per pairing call and not persisted.
#[derive(Debug, Clone)]
pub struct TargetDescriptor {
    /// Absolute target path.
    pub path: PathBuf,
    /// Path with the final component removed.
    pub parent_dir: PathBuf,
    /// Final path component.
    pub filename: String,
    /// Filename without the extension.
    pub base_name: String,
    /// Lowercase extension without the leading dot. Empty if none.
    pub extension: String,
}

impl TargetDescriptor {
    /// Decompose an absolute target path into its components.
    #[must_use]
    pub fn from_target_path(path: PathBuf) -> Self {
        Self {
            filename: path_to_filename_string(&path),
            base_name: path_to_file_stem_string(&path),
            extension: path_to_file_extension_string(&path),
            parent_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            path,
        }
    }
}

/// One source file together with its computed destination.
#[derive(Debug, Clone)]
pub struct CollationPair {
    /// Source file record from the walk.
    pub source: FileRecord,
    /// Destination computed by the naming policy.
    pub target: TargetDescriptor,
}

/// The filesystem operation performed for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Relocate the file, removing the source.
    Move,
    /// Duplicate the file, leaving the source in place.
    Copy,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Copy => "copy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of processing one collation pair.
#[derive(Debug, Clone)]
pub struct CollationResult {
    /// Source file path.
    pub source: PathBuf,
    /// Final target path.
    /// Differs from the originally computed target when a collision was resolved by renaming.
    pub target: PathBuf,
    /// Operation that was performed, or planned on a dry run.
    pub operation: Operation,
    /// Whether the pair was processed without failure.
    pub success: bool,
    /// Failure description when `success` is false.
    pub error: Option<String>,
}
