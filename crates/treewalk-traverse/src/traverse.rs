//! Top-level traversal entry points.
//!
//! The root is handled differently from its descendants: the pre-directory
//! hook only runs on it with `pre_root`, the visitor only sees it with
//! `visit_root` and then *after* the whole subtree, and the post-directory
//! hook only runs on it with `post_root`.

use std::path::Path;

use tracing::{debug_span, trace};
use treewalk_core::{ControlSignal, Entry, EntryType, IntoSignal, TraverseError};

use crate::engine::{Engine, check_dir};
use crate::options::{TraversalOptions, hook};

/// Traverse `root` with the given options, calling `visit` for each
/// eligible entry.
///
/// Overrides any visitor already set on `options`.
pub fn traverse<'a, F, R>(
    root: impl AsRef<Path>,
    mut options: TraversalOptions<'a>,
    visit: F,
) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R + 'a,
    R: IntoSignal,
{
    options.visit = Some(hook(visit));
    traverse_with(root, options)
}

/// Traverse `root` with default options.
pub fn traverse_all<F, R>(root: impl AsRef<Path>, visit: F) -> Result<(), TraverseError>
where
    F: FnMut(&Entry) -> R,
    R: IntoSignal,
{
    traverse(root, TraversalOptions::default(), visit)
}

/// Traverse `root` using the visitor carried inside `options`.
///
/// Without a visitor only the hooks run.
///
/// The root is checked before anything else, so a missing root or one that
/// is not a directory fails with [`TraverseError::NotFound`] or
/// [`TraverseError::NotADirectory`] without the `pre_root` hook ever running.
pub fn traverse_with(
    root: impl AsRef<Path>,
    mut options: TraversalOptions<'_>,
) -> Result<(), TraverseError> {
    let root = root.as_ref();
    let _span = debug_span!("traverse", root = %root.display()).entered();

    check_dir(root)?;

    let config = options.config.clone();
    let root_entry = Entry::new(root, EntryType::Directory);
    let mut engine = Engine::new(&mut options);

    if config.pre_root
        && let Some(signal @ (ControlSignal::Terminate | ControlSignal::SkipSubtree)) =
            engine.pre_dir(&root_entry)?
    {
        trace!(%signal, "root pre-directory hook aborted the traversal");
        return Ok(());
    }

    if engine.walk(root, config.max_depth)?.is_terminate() {
        trace!("traversal terminated");
        return Ok(());
    }

    let visit_root =
        config.visit_root && config.kind.surfaces_dirs() && engine.eligible(&root_entry);
    if visit_root && engine.visit(&root_entry)?.is_some_and(ControlSignal::is_terminate) {
        trace!("traversal terminated by root visit");
        return Ok(());
    }

    if config.post_root {
        engine.post_dir(&root_entry)?;
    }

    Ok(())
}
