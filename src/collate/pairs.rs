//! Pairing engine: ordered (source, target) pairs from a filtered walk.

use std::path::Path;

use crate::collate::naming::{default_naming, resolve};
use crate::collate::{CollateError, CollateOptions, CollationPair, NamingFn, list_files};

/// Build the ordered pairs that a [`collate`](crate::collate::collate) call would process.
///
/// Walks the source tree, keeps the files accepted by the source filter,
/// and resolves each survivor to a target descriptor with the naming policy.
///
/// Pairs are ordered deepest source first so that, when moving, a directory is
/// observed empty right after its last file leaves it and can be deleted without
/// a second full-tree scan. Pairs at equal depth are ordered by source path.
///
/// # Errors
/// Fails when the source root cannot be walked.
pub fn copy_pairs(source: &Path, target: &Path, options: &CollateOptions) -> Result<Vec<CollationPair>, CollateError> {
    let default: &NamingFn = &default_naming;
    let naming = options.naming.as_deref().unwrap_or(default);

    let mut pairs: Vec<CollationPair> = list_files(source, options.recursive)?
        .into_iter()
        .filter(|record| options.source_filter.as_deref().is_none_or(|filter| filter(record)))
        .map(|record| {
            let target = resolve(naming, &record, source, target);
            CollationPair { source: record, target }
        })
        .collect();

    sort_by_path_depth(&mut pairs);
    Ok(pairs)
}

/// Sort by descending source path depth, ties by ascending source path.
fn sort_by_path_depth(pairs: &mut [CollationPair]) {
    pairs.sort_by(|a, b| {
        path_depth(&b.source.path)
            .cmp(&path_depth(&a.source.path))
            .then_with(|| a.source.path.cmp(&b.source.path))
    });
}

/// Number of path segments.
fn path_depth(path: &Path) -> usize {
    path.components().count()
}
