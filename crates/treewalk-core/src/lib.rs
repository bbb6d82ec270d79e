//! Core types for treewalk.
//!
//! This crate provides the vocabulary shared by the traversal engine and its
//! callers: entries discovered while listing a directory, the kind filter,
//! control signals returned by hooks, the predicate combinator used for
//! inclusion/exclusion, and the data-only walk configuration.

mod config;
mod entry;
mod error;
mod predicate;
mod signal;

pub use config::{WalkConfig, WalkConfigBuilder, depth_limit};
pub use entry::{Entry, EntryKind, EntryType};
pub use error::{BoxError, TraverseError};
pub use predicate::{Candidate, EntryFilter, Filter, Members, Pattern, Predicate, Target, TypeTest};
pub use signal::{ControlSignal, IntoSignal};
