//! Core collation engine: pair source files with computed target paths and
//! relocate or duplicate them.
//!
//! The engine is built from four pieces: a tree walker producing flat, typed
//! listings, a path resolver turning naming-policy fragments into target
//! descriptors, a pairing engine producing depth-sorted (source, target)
//! pairs, and an executor performing the move-or-copy with collision handling
//! and empty source directory cleanup.

mod error;
mod executor;
mod naming;
mod options;
mod pairs;
mod record;
mod walk;

pub use error::CollateError;
pub use executor::collate;
pub use naming::{NamingFn, default_naming, resolve};
pub use options::{CollateOptions, SourceFilter};
pub use pairs::copy_pairs;
pub use record::{CollationPair, CollationResult, FileRecord, Operation, TargetDescriptor};
pub use walk::{list_directories, list_files, walk};
