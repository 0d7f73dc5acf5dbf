//! Target path resolution from pluggable naming policies.

use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::collate::{FileRecord, TargetDescriptor};

/// Naming policy: a pure function mapping a file record to a path fragment
/// relative to the target root.
///
/// Arguments are the walked file record, the source root, and the target root.
pub type NamingFn = dyn Fn(&FileRecord, &Path, &Path) -> PathBuf + Send + Sync;

/// Default naming policy: the record's path relative to the source root,
/// preserving subdirectory structure under the target.
///
/// Falls back to the bare filename for a record outside the source root.
#[must_use]
pub fn default_naming(record: &FileRecord, source_root: &Path, _target_root: &Path) -> PathBuf {
    record
        .path
        .strip_prefix(source_root)
        .map_or_else(|_| PathBuf::from(&record.filename), Path::to_path_buf)
}

/// Compute the destination for `record` by invoking the naming policy and
/// joining the returned fragment onto `target_root`.
///
/// A single leading separator on the fragment is stripped so that policies
/// may return either `sub/name.ext` or `/sub/name.ext`.
#[must_use]
pub fn resolve(naming: &NamingFn, record: &FileRecord, source_root: &Path, target_root: &Path) -> TargetDescriptor {
    let fragment = naming(record, source_root, target_root);
    let relative = match fragment.strip_prefix(MAIN_SEPARATOR_STR) {
        Ok(stripped) => stripped.to_path_buf(),
        Err(_) => fragment,
    };
    TargetDescriptor::from_target_path(target_root.join(relative))
}

#[cfg(test)]
mod naming_tests {
    use super::*;

    use std::fs::{self, File};

    use tempfile::tempdir;

    #[test]
    fn default_naming_preserves_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        let path = dir.path().join("a/b/file.txt");
        File::create(&path).unwrap();

        let record = FileRecord::from_path(&path).unwrap();
        let fragment = default_naming(&record, dir.path(), Path::new("/unused"));
        assert_eq!(fragment, PathBuf::from("a/b/file.txt"));
    }

    #[test]
    fn default_naming_outside_root_uses_filename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stray.txt");
        File::create(&path).unwrap();

        let record = FileRecord::from_path(&path).unwrap();
        let fragment = default_naming(&record, Path::new("/some/other/root"), Path::new("/unused"));
        assert_eq!(fragment, PathBuf::from("stray.txt"));
    }

    #[test]
    fn resolve_joins_fragment_onto_target_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.MP4");
        File::create(&path).unwrap();
        let record = FileRecord::from_path(&path).unwrap();

        let naming: &NamingFn = &|record, _, _| PathBuf::from("videos").join(&record.filename);
        let target = resolve(naming, &record, dir.path(), Path::new("/collated"));
        assert_eq!(target.path, PathBuf::from("/collated/videos/clip.MP4"));
        assert_eq!(target.parent_dir, PathBuf::from("/collated/videos"));
        assert_eq!(target.filename, "clip.MP4");
        assert_eq!(target.base_name, "clip");
        assert_eq!(target.extension, "mp4");
    }

    #[test]
    fn resolve_strips_a_leading_separator() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        File::create(&path).unwrap();
        let record = FileRecord::from_path(&path).unwrap();

        let naming: &NamingFn = &|record, _, _| Path::new("/videos").join(&record.filename);
        let target = resolve(naming, &record, dir.path(), Path::new("/collated"));
        assert_eq!(target.path, PathBuf::from("/collated/videos/clip.mp4"));
    }
}
