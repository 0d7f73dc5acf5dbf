//! Built-in organization policies layered on top of the collation core.
//!
//! Each policy is a plain naming function grouping files under the target
//! root by date, by extension, or by first alphanumeric character.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::collate::{
    CollateError, CollateOptions, CollationResult, FileRecord, NamingFn, SourceFilter, collate,
};

/// Default date format for date grouping: one directory per day.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default directory name for files without an extension.
pub const DEFAULT_NO_EXTENSION_DIR: &str = "any";

/// Default directory name for files starting with no alphanumeric character.
pub const DEFAULT_SYMBOL_DIR: &str = "0";

/// Which file timestamp a date grouping uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSource {
    /// File creation time.
    #[default]
    Created,
    /// File modification time.
    Modified,
}

/// How organized files are grouped under the target root.
#[derive(Debug, Clone, Default)]
pub enum Grouping {
    /// Keep the source directory structure.
    #[default]
    None,
    /// One directory level per chrono format string, from the file timestamp.
    Date {
        formats: Vec<String>,
        source: DateSource,
    },
    /// One directory per lowercase file extension.
    Extension { no_extension_dir: String },
    /// One directory per first ASCII alphanumeric character of the file name.
    Alphabetical { uppercase: bool, symbol_dir: String },
}

/// Options for [`organize`].
#[derive(Debug)]
pub struct OrganizeOptions {
    /// Recurse into subdirectories. Enabled by default.
    pub recursive: bool,
    /// Copy files instead of moving them.
    pub copy: bool,
    /// After a move, delete source subdirectories left without files. Enabled by default.
    pub clean_dirs: bool,
    /// Report the planned operations without touching the filesystem.
    pub dry_run: bool,
    /// Replace existing files at the target path.
    pub overwrite: bool,
    /// On a collision, retry once with a unique suffix. Enabled by default.
    pub rename: bool,
    /// Only organize files with one of these extensions (without the leading dot).
    /// All files when empty.
    pub extensions: Vec<String>,
    /// Grouping applied under the target root.
    pub grouping: Grouping,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            copy: false,
            clean_dirs: true,
            dry_run: false,
            overwrite: false,
            rename: true,
            extensions: Vec::new(),
            grouping: Grouping::None,
        }
    }
}

/// Organize files from `source` into `target` according to the configured grouping.
///
/// A non-empty extension list becomes the source filter;
/// extension matching is case-insensitive.
///
/// # Errors
/// Fails when the source root cannot be walked.
pub fn organize(source: &Path, target: &Path, options: OrganizeOptions) -> Result<Vec<CollationResult>, CollateError> {
    let collate_options = CollateOptions {
        recursive: options.recursive,
        copy: options.copy,
        clean_dirs: options.clean_dirs,
        dry_run: options.dry_run,
        overwrite: options.overwrite,
        rename: options.rename,
        source_filter: extension_filter(options.extensions),
        naming: naming_for(options.grouping),
    };
    collate(source, target, &collate_options)
}

/// Build a source filter accepting the given extensions, or `None` to accept all files.
fn extension_filter(extensions: Vec<String>) -> Option<Box<SourceFilter>> {
    if extensions.is_empty() {
        return None;
    }
    let extensions: Vec<String> = extensions
        .into_iter()
        .map(|extension| extension.trim_start_matches('.').to_lowercase())
        .collect();
    Some(Box::new(move |record: &FileRecord| {
        extensions.contains(&record.extension)
    }))
}

/// The naming policy for a grouping, or `None` for the structure-preserving default.
#[must_use]
pub fn naming_for(grouping: Grouping) -> Option<Box<NamingFn>> {
    match grouping {
        Grouping::None => None,
        Grouping::Date { formats, source } => Some(date_naming(formats, source)),
        Grouping::Extension { no_extension_dir } => Some(extension_naming(no_extension_dir)),
        Grouping::Alphabetical { uppercase, symbol_dir } => Some(alphabetical_naming(uppercase, symbol_dir)),
    }
}

/// Group files under one directory level per date format string,
/// formatted from the chosen file timestamp.
#[must_use]
pub fn date_naming(formats: Vec<String>, source: DateSource) -> Box<NamingFn> {
    Box::new(move |record, _, _| {
        let timestamp: DateTime<Local> = match source {
            DateSource::Created => record.created,
            DateSource::Modified => record.modified,
        };
        let mut fragment = PathBuf::new();
        for format in &formats {
            fragment.push(timestamp.format(format).to_string());
        }
        fragment.push(&record.filename);
        fragment
    })
}

/// Group files into one directory per extension,
/// with a fallback directory for files without one.
#[must_use]
pub fn extension_naming(no_extension_dir: String) -> Box<NamingFn> {
    Box::new(move |record, _, _| {
        let dir = if record.extension.is_empty() {
            &no_extension_dir
        } else {
            &record.extension
        };
        Path::new(dir).join(&record.filename)
    })
}

/// Group files by the first ASCII alphanumeric character of their base name,
/// with a symbol directory for names that have none.
#[must_use]
pub fn alphabetical_naming(uppercase: bool, symbol_dir: String) -> Box<NamingFn> {
    Box::new(move |record, _, _| {
        let dir = record.base_name.chars().find(char::is_ascii_alphanumeric).map_or_else(
            || symbol_dir.clone(),
            |first| {
                let first = if uppercase {
                    first.to_ascii_uppercase()
                } else {
                    first.to_ascii_lowercase()
                };
                first.to_string()
            },
        );
        Path::new(&dir).join(&record.filename)
    })
}
