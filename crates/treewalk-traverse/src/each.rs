//! Convenience wrappers over [`traverse`](crate::traverse).
//!
//! Visitors may return anything implementing [`IntoSignal`], so returning
//! `ControlSignal::Terminate` stops these walks early as well.

use std::path::Path;

use treewalk_core::{Entry, EntryKind, IntoSignal, Predicate, TraverseError, WalkConfig};

use crate::options::TraversalOptions;
use crate::traverse::traverse;

/// Visit each immediate child of `dir` of the given kind.
///
/// With [`EntryKind::Files`] only regular files are passed on; entries that
/// are neither files nor directories are dropped. The recursive wrappers
/// treat every non-directory as a file instead.
pub fn each_file<F, R>(dir: impl AsRef<Path>, kind: EntryKind, visit: F) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    shallow(dir, kind, None, visit)
}

/// Visit each immediate subdirectory of `dir`.
pub fn each_dir<F, R>(dir: impl AsRef<Path>, visit: F) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    each_file(dir, EntryKind::Directories, visit)
}

/// Visit every descendant of `dir` of the given kind.
pub fn each_file_recurse<F, R>(
    dir: impl AsRef<Path>,
    kind: EntryKind,
    visit: F,
) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    let options = TraversalOptions::builder()
        .config(WalkConfig::recursive(kind))
        .build()?;
    traverse(dir, options, visit)
}

/// Visit every descendant directory of `dir`.
pub fn each_dir_recurse<F, R>(dir: impl AsRef<Path>, visit: F) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    each_file_recurse(dir, EntryKind::Directories, visit)
}

/// Visit each immediate child of `dir` of the given kind whose name matches.
///
/// Like [`each_file`], [`EntryKind::Files`] admits only regular files.
pub fn each_file_match<F, R>(
    dir: impl AsRef<Path>,
    kind: EntryKind,
    name_filter: Predicate,
    visit: F,
) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    shallow(dir, kind, Some(name_filter), visit)
}

/// Visit each immediate subdirectory of `dir` whose name matches.
pub fn each_dir_match<F, R>(
    dir: impl AsRef<Path>,
    name_filter: Predicate,
    visit: F,
) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    each_file_match(dir, EntryKind::Directories, name_filter, visit)
}

fn shallow<F, R>(
    dir: impl AsRef<Path>,
    kind: EntryKind,
    name_filter: Option<Predicate>,
    mut visit: F,
) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    let mut builder = TraversalOptions::builder().config(WalkConfig::shallow(kind));
    if let Some(predicate) = name_filter {
        builder = builder.name_filter(predicate);
    }
    let options = builder.build()?;

    traverse(dir, options, move |entry: &Entry| {
        if kind == EntryKind::Files && !entry.is_file() {
            return Ok(None);
        }
        visit(entry).into_signal()
    })
}
