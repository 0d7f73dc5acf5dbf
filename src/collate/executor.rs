//! Collation executor: sequential move-or-copy with collision handling and
//! empty source directory cleanup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;
use walkdir::WalkDir;

use crate::collate::{CollateError, CollateOptions, CollationPair, CollationResult, Operation, copy_pairs};
use crate::insert_suffix_before_extension;

/// Outcome of a single transfer attempt.
enum TransferOutcome {
    Done,
    Collision,
    Failed(io::Error),
}

/// Pair every file under `source` with a target path and move or copy it there.
///
/// Pairs are processed strictly one at a time in the order produced by
/// [`copy_pairs`], each pair's cleanup completing before the next pair starts:
/// the cleanup step inspects directory state that a concurrent sibling
/// operation could race.
///
/// Per-pair failures never abort the batch; exactly one result is returned per
/// pair, in processing order.
///
/// # Errors
/// Fails only when the source root cannot be walked.
pub fn collate(source: &Path, target: &Path, options: &CollateOptions) -> Result<Vec<CollationResult>, CollateError> {
    let pairs = copy_pairs(source, target, options)?;
    let operation = if options.copy { Operation::Copy } else { Operation::Move };

    let mut results = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        results.push(process_pair(pair, source, operation, options));
    }
    Ok(results)
}

/// Process one pair: transfer, collision retry, and source directory cleanup.
fn process_pair(
    pair: &CollationPair,
    source_root: &Path,
    operation: Operation,
    options: &CollateOptions,
) -> CollationResult {
    if options.dry_run {
        return success(pair, pair.target.path.clone(), operation);
    }

    let final_target = match transfer(operation, &pair.source.path, &pair.target.path, options.overwrite) {
        TransferOutcome::Done => pair.target.path.clone(),
        TransferOutcome::Collision => {
            if !options.rename {
                let error = CollateError::TargetExists(pair.target.path.clone());
                return failure(pair, operation, error.to_string());
            }
            let renamed = unique_target(&pair.target.path);
            match transfer(operation, &pair.source.path, &renamed, options.overwrite) {
                TransferOutcome::Done => renamed,
                TransferOutcome::Collision => {
                    let error = CollateError::TargetExists(renamed);
                    return failure(pair, operation, error.to_string());
                }
                TransferOutcome::Failed(error) => return failure(pair, operation, error.to_string()),
            }
        }
        TransferOutcome::Failed(error) => return failure(pair, operation, error.to_string()),
    };

    if operation == Operation::Move && options.clean_dirs {
        if let Err(error) = clean_empty_dirs(&pair.source.parent_dir, source_root) {
            return CollationResult {
                source: pair.source.path.clone(),
                target: final_target,
                operation,
                success: false,
                error: Some(format!("Cleanup failed: {error}")),
            };
        }
    }

    success(pair, final_target, operation)
}

fn success(pair: &CollationPair, target: PathBuf, operation: Operation) -> CollationResult {
    CollationResult {
        source: pair.source.path.clone(),
        target,
        operation,
        success: true,
        error: None,
    }
}

fn failure(pair: &CollationPair, operation: Operation, error: String) -> CollationResult {
    CollationResult {
        source: pair.source.path.clone(),
        target: pair.target.path.clone(),
        operation,
        success: false,
        error: Some(error),
    }
}

/// Attempt a single move or copy from `source` to `target`,
/// creating the target's parent directories as needed.
///
/// Without `overwrite`, an existing target is reported as a collision and
/// neither file is touched.
fn transfer(operation: Operation, source: &Path, target: &Path, overwrite: bool) -> TransferOutcome {
    if !overwrite && target.exists() {
        return TransferOutcome::Collision;
    }
    if let Some(parent) = target.parent() {
        if let Err(error) = fs::create_dir_all(parent) {
            return TransferOutcome::Failed(error);
        }
    }
    let result = match operation {
        Operation::Move => move_file(source, target),
        Operation::Copy => fs::copy(source, target).map(|_| ()),
    };
    match result {
        Ok(()) => TransferOutcome::Done,
        Err(error) => TransferOutcome::Failed(error),
    }
}

/// Move with a rename, falling back to copy and delete across filesystem boundaries.
fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, target)?;
            fs::remove_file(source)
        }
        Err(error) => Err(error),
    }
}

/// Form a collision retry path by inserting a random unique suffix between the
/// target's base name and its extension.
fn unique_target(target: &Path) -> PathBuf {
    insert_suffix_before_extension(target, &format!("-{}", Uuid::new_v4()))
}

/// Delete source directories that no longer contain any files,
/// ascending from the moved file's parent directory.
///
/// Stops at the walked source root, which is never deleted, and at the first
/// directory that still has files anywhere below it. Relies on the deepest-first
/// pair order: a directory is only ever found empty after all its descendants
/// have already been moved.
fn clean_empty_dirs(parent: &Path, source_root: &Path) -> io::Result<()> {
    let mut dir = parent;
    while dir != source_root && dir.starts_with(source_root) {
        if contains_files(dir)? {
            break;
        }
        fs::remove_dir_all(dir)?;
        match dir.parent() {
            Some(next) => dir = next,
            None => break,
        }
    }
    Ok(())
}

/// Check whether any non-directory entry remains under `dir`.
fn contains_files(dir: &Path) -> io::Result<bool> {
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_dir() {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod executor_tests {
    use super::*;

    use std::fs::File;

    use tempfile::tempdir;

    fn create_file(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }

    #[test]
    fn move_collects_deepest_first_and_cleans_empty_dirs() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("a.mp4"));
        create_file(&source.path().join("b/c.png"));
        create_file(&source.path().join("b/d/e.mp4"));

        let options = CollateOptions {
            recursive: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|result| result.success));
        assert!(target.path().join("a.mp4").exists());
        assert!(target.path().join("b/c.png").exists());
        assert!(target.path().join("b/d/e.mp4").exists());

        // Emptied subdirectories are pruned; the source root itself stays.
        assert!(!source.path().join("b").exists());
        assert!(source.path().exists());
    }

    #[test]
    fn move_cleans_ancestors_without_direct_files() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b/d/e.mp4"));

        let options = CollateOptions {
            recursive: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();
        assert!(results.iter().all(|result| result.success));

        // `b` held no files of its own but was emptied by the move.
        assert!(!source.path().join("b").exists());
        assert!(source.path().exists());
    }

    #[test]
    fn directories_with_excluded_files_are_preserved() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b/keep.txt"));
        create_file(&source.path().join("b/take.png"));

        let options = CollateOptions {
            recursive: true,
            source_filter: Some(Box::new(|record| record.extension == "png")),
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert_eq!(results.len(), 1);
        assert!(source.path().join("b/keep.txt").exists());
        assert!(!source.path().join("b/take.png").exists());
        assert!(target.path().join("b/take.png").exists());
    }

    #[test]
    fn clean_dirs_disabled_keeps_empty_directories() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b/c.png"));

        let options = CollateOptions {
            recursive: true,
            clean_dirs: false,
            ..Default::default()
        };
        collate(source.path(), target.path(), &options).unwrap();

        assert!(source.path().join("b").exists());
        assert!(!source.path().join("b/c.png").exists());
    }

    #[test]
    fn copy_mode_never_deletes_anything() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b/c.png"));

        let options = CollateOptions {
            recursive: true,
            copy: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert!(results.iter().all(|result| result.success));
        assert_eq!(results[0].operation, Operation::Copy);
        assert!(source.path().join("b/c.png").exists());
        assert!(target.path().join("b/c.png").exists());
    }

    #[test]
    fn collision_renames_with_unique_suffix_by_default() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b.png"));
        create_file(&target.path().join("b.png"));

        let results = collate(source.path(), target.path(), &CollateOptions::default()).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].success);
        assert_ne!(results[0].target, target.path().join("b.png"));

        let name = results[0].target.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("b-"));
        assert!(name.ends_with(".png"));
        assert!(results[0].target.exists());
        assert!(!source.path().join("b.png").exists());
    }

    #[test]
    fn collision_rename_handles_missing_extension() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("README"));
        create_file(&target.path().join("README"));

        let results = collate(source.path(), target.path(), &CollateOptions::default()).unwrap();

        assert!(results[0].success);
        let name = results[0].target.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("README-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn collision_without_rename_is_recorded_and_leaves_both_files() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b.png"));
        create_file(&target.path().join("b.png"));

        let options = CollateOptions {
            rename: false,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].error.is_some());
        assert!(source.path().join("b.png").exists());
        assert!(target.path().join("b.png").exists());
    }

    #[test]
    fn collision_failure_does_not_abort_the_batch() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("a.png"));
        create_file(&source.path().join("b.png"));
        create_file(&target.path().join("b.png"));

        let options = CollateOptions {
            rename: false,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert_eq!(results.len(), 2);
        let ok = results.iter().filter(|result| result.success).count();
        assert_eq!(ok, 1);
        assert!(target.path().join("a.png").exists());
    }

    #[test]
    fn overwrite_replaces_the_existing_target() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        let source_file = source.path().join("b.png");
        create_file(&source_file);
        fs::write(&source_file, b"fresh").unwrap();
        let target_file = target.path().join("b.png");
        create_file(&target_file);
        fs::write(&target_file, b"stale").unwrap();

        let options = CollateOptions {
            overwrite: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert!(results[0].success);
        assert_eq!(results[0].target, target_file);
        assert_eq!(fs::read(&target_file).unwrap(), b"fresh");
        assert!(!source_file.exists());
    }

    #[test]
    fn dry_run_reports_the_plan_without_io() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("b/c.png"));

        let options = CollateOptions {
            recursive: true,
            dry_run: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].success);
        assert_eq!(results[0].operation, Operation::Move);
        assert_eq!(results[0].target, target.path().join("b/c.png"));
        assert!(source.path().join("b/c.png").exists());
        assert!(!target.path().join("b/c.png").exists());
    }

    #[test]
    fn dry_run_plan_matches_real_run_targets() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("a.mp4"));
        create_file(&source.path().join("b/c.png"));

        let dry = CollateOptions {
            recursive: true,
            dry_run: true,
            ..Default::default()
        };
        let planned = collate(source.path(), target.path(), &dry).unwrap();

        let real = CollateOptions {
            recursive: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &real).unwrap();

        let planned_targets: Vec<_> = planned.iter().map(|result| result.target.clone()).collect();
        let real_targets: Vec<_> = results.iter().map(|result| result.target.clone()).collect();
        assert_eq!(planned_targets, real_targets);
    }

    #[test]
    fn collate_fails_fast_on_invalid_source() {
        let target = tempdir().unwrap();
        let result = collate(Path::new("does/not/exist"), target.path(), &CollateOptions::default());
        assert!(matches!(result, Err(CollateError::NotADirectory(_))));
    }

    #[test]
    fn results_follow_depth_sorted_pair_order() {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        create_file(&source.path().join("a.mp4"));
        create_file(&source.path().join("b/c.png"));
        create_file(&source.path().join("b/d/e.mp4"));

        let options = CollateOptions {
            recursive: true,
            ..Default::default()
        };
        let results = collate(source.path(), target.path(), &options).unwrap();

        let names: Vec<_> = results
            .iter()
            .map(|result| result.source.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["e.mp4", "c.png", "a.mp4"]);
    }
}
