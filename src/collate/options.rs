//! Options consumed by the pairing engine and the collation executor.

use std::fmt;

use crate::collate::{FileRecord, NamingFn};

/// Predicate deciding whether a walked file takes part in collation.
pub type SourceFilter = dyn Fn(&FileRecord) -> bool + Send + Sync;

/// Options for [`copy_pairs`](crate::collate::copy_pairs) and [`collate`](crate::collate::collate).
///
/// Built once per call and never mutated afterwards.
pub struct CollateOptions {
    /// Recurse into subdirectories of the source root.
    pub recursive: bool,
    /// Copy files instead of moving them. Copying never deletes anything.
    pub copy: bool,
    /// After a move, delete source subdirectories left without any files.
    /// Enabled by default. Has no effect when copying.
    pub clean_dirs: bool,
    /// Report the planned operations without touching the filesystem.
    pub dry_run: bool,
    /// Replace existing files at the target path instead of treating them as collisions.
    pub overwrite: bool,
    /// On a collision, retry once with a unique suffix inserted into the target filename.
    /// Enabled by default.
    pub rename: bool,
    /// Keep only files accepted by this predicate. All files are kept when `None`.
    pub source_filter: Option<Box<SourceFilter>>,
    /// Naming policy computing relative target fragments.
    /// The structure-preserving default policy is used when `None`.
    pub naming: Option<Box<NamingFn>>,
}

impl Default for CollateOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            copy: false,
            clean_dirs: true,
            dry_run: false,
            overwrite: false,
            rename: true,
            source_filter: None,
            naming: None,
        }
    }
}

impl fmt::Debug for CollateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollateOptions")
            .field("recursive", &self.recursive)
            .field("copy", &self.copy)
            .field("clean_dirs", &self.clean_dirs)
            .field("dry_run", &self.dry_run)
            .field("overwrite", &self.overwrite)
            .field("rename", &self.rename)
            .field("source_filter", &self.source_filter.is_some())
            .field("naming", &self.naming.is_some())
            .finish()
    }
}
