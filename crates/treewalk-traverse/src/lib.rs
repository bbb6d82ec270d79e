//! Directory traversal engine for treewalk.
//!
//! This crate provides a recursive, depth-first, single-threaded directory
//! walker driven by caller-supplied hooks.
//!
//! # Overview
//!
//! `treewalk-traverse` lists a directory, optionally sorts its children,
//! surfaces the eligible ones to a visitor and recurses into
//! subdirectories. Key features:
//!
//! - **Kind filtering**: surface files, directories or both
//! - **Predicates**: inclusion/exclusion on the whole entry or its name
//! - **Per-directory sorting** with any comparator
//! - **Depth limiting** (`max_depth`, where 0 lists only the root's children)
//! - **Pre/post directory hooks** and root-level variants
//! - **Control signals**: `SKIP_SIBLINGS`, `SKIP_SUBTREE`, `TERMINATE`
//!
//! # Example
//!
//! ```rust,no_run
//! use treewalk_traverse::{ControlSignal, Entry, EntryKind, Predicate, TraversalOptions, sort, traverse};
//!
//! let mut total = 0u64;
//! let options = TraversalOptions::builder()
//!     .kind(EntryKind::Files)
//!     .name_filter(Predicate::regex(r".*\.rs").unwrap())
//!     .pre_dir(|dir: &Entry| (dir.name() == "target").then_some(ControlSignal::SkipSubtree))
//!     .sort(sort::files_first)
//!     .build()
//!     .unwrap();
//!
//! traverse("/path/to/project", options, |file: &Entry| {
//!     total += std::fs::metadata(&file.path).map(|m| m.len()).unwrap_or(0);
//! })
//! .unwrap();
//!
//! println!("{total} bytes of Rust");
//! ```
//!
//! # Error handling
//!
//! A missing root or a root that is not a directory fails before anything
//! is listed, as do conflicting filters. A subdirectory that cannot be read
//! is treated as empty. Errors returned from hooks are never swallowed:
//! they unwind the whole traversal.
//!
//! Recursion depth equals directory depth, so very deep trees without a
//! `max_depth` can exhaust the stack. Symlinked directories are followed and
//! cycles are not detected.

mod each;
mod engine;
mod options;
pub mod sort;
mod traverse;

pub use each::{
    each_dir, each_dir_match, each_dir_recurse, each_file, each_file_match, each_file_recurse,
};
pub use options::{Comparator, Hook, TraversalOptions, TraversalOptionsBuilder};
pub use traverse::{traverse, traverse_all, traverse_with};

// Re-export core types for convenience
pub use treewalk_core::{
    BoxError, Candidate, ControlSignal, Entry, EntryFilter, EntryKind, EntryType, IntoSignal,
    Predicate, TraverseError, TypeTest, WalkConfig,
};
