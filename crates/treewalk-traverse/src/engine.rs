//! Recursive depth-first traversal engine.
//!
//! One stack frame per directory. Each frame lists the directory, sorts the
//! children if a comparator is configured, and then for every child runs the
//! visitor and the directory hooks, threading their control signals upward.

use std::path::Path;

use tracing::{debug, trace};
use treewalk_core::{ControlSignal, Entry, TraverseError};

use crate::options::{Hook, TraversalOptions};

/// How the current directory loop proceeds after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Proceed,
    SkipSubtree,
    Break,
    Terminate,
}

impl From<Option<ControlSignal>> for Flow {
    fn from(signal: Option<ControlSignal>) -> Self {
        match signal {
            None | Some(ControlSignal::Continue) => Flow::Proceed,
            Some(ControlSignal::SkipSubtree) => Flow::SkipSubtree,
            Some(ControlSignal::SkipSiblings) => Flow::Break,
            Some(ControlSignal::Terminate) => Flow::Terminate,
        }
    }
}

/// Walks directories using a borrowed set of options.
pub(crate) struct Engine<'o, 'a> {
    options: &'o mut TraversalOptions<'a>,
}

impl<'o, 'a> Engine<'o, 'a> {
    pub(crate) fn new(options: &'o mut TraversalOptions<'a>) -> Self {
        Self { options }
    }

    /// Traverse the children of `dir`.
    ///
    /// `remaining` is the number of further levels to descend into
    /// (`None` = unlimited). Returns `Terminate` if any callback asked to stop,
    /// otherwise `Continue`.
    pub(crate) fn walk(
        &mut self,
        dir: &Path,
        remaining: Option<u32>,
    ) -> Result<ControlSignal, TraverseError> {
        check_dir(dir)?;

        let mut children = list_children(dir);
        if let Some(cmp) = self.options.sort.as_ref() {
            children.sort_by(|a, b| cmp(a, b));
        }

        let kind = self.options.config.kind;

        for child in &children {
            if child.is_dir() {
                if kind.surfaces_dirs() && self.eligible(child) {
                    match Flow::from(self.visit(child)?) {
                        Flow::Break => break,
                        Flow::Terminate => return Ok(ControlSignal::Terminate),
                        Flow::Proceed | Flow::SkipSubtree => {}
                    }
                }

                if remaining == Some(0) {
                    continue;
                }

                match Flow::from(self.pre_dir(child)?) {
                    Flow::Break => break,
                    Flow::Terminate => return Ok(ControlSignal::Terminate),
                    Flow::SkipSubtree => trace!(path = %child.path.display(), "subtree skipped"),
                    Flow::Proceed => {
                        let signal = self.walk(&child.path, remaining.map(|d| d - 1))?;
                        if signal.is_terminate() {
                            return Ok(ControlSignal::Terminate);
                        }
                    }
                }

                match Flow::from(self.post_dir(child)?) {
                    Flow::Break => break,
                    Flow::Terminate => return Ok(ControlSignal::Terminate),
                    Flow::Proceed | Flow::SkipSubtree => {}
                }
            } else if kind.surfaces_files() && self.eligible(child) {
                match Flow::from(self.visit(child)?) {
                    Flow::Break => break,
                    Flow::Terminate => return Ok(ControlSignal::Terminate),
                    Flow::Proceed | Flow::SkipSubtree => {}
                }
            }
        }

        Ok(ControlSignal::Continue)
    }

    /// Check the entry against the inclusion/exclusion filters.
    pub(crate) fn eligible(&self, entry: &Entry) -> bool {
        self.options.filter.admits(entry)
    }

    pub(crate) fn visit(&mut self, entry: &Entry) -> Result<Option<ControlSignal>, TraverseError> {
        call(self.options.visit.as_mut(), entry)
    }

    pub(crate) fn pre_dir(&mut self, entry: &Entry) -> Result<Option<ControlSignal>, TraverseError> {
        call(self.options.pre_dir.as_mut(), entry)
    }

    pub(crate) fn post_dir(&mut self, entry: &Entry) -> Result<Option<ControlSignal>, TraverseError> {
        call(self.options.post_dir.as_mut(), entry)
    }
}

fn call(hook: Option<&mut Hook<'_>>, entry: &Entry) -> Result<Option<ControlSignal>, TraverseError> {
    match hook {
        Some(hook) => hook(entry).map_err(|e| TraverseError::callback(&entry.path, e)),
        None => Ok(None),
    }
}

/// Fail unless `path` exists and is a directory.
pub(crate) fn check_dir(path: &Path) -> Result<(), TraverseError> {
    let metadata = std::fs::metadata(path).map_err(|e| TraverseError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(TraverseError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// List the immediate children of `dir`.
///
/// A directory that cannot be read yields no children.
fn list_children(dir: &Path) -> Vec<Entry> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            debug!(path = %dir.display(), error = %err, "cannot list directory, treating as empty");
            return Vec::new();
        }
    };

    read_dir
        .filter_map(|result| match result {
            Ok(dir_entry) => Some(Entry::from_path(dir_entry.path())),
            Err(err) => {
                debug!(path = %dir.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use treewalk_core::EntryType;

    use crate::sort;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "hello").unwrap();
        fs::write(root.join("sub/b.txt"), "world").unwrap();
        fs::write(root.join("sub/c.txt"), "again").unwrap();

        temp
    }

    #[test]
    fn test_flow_from_signal() {
        assert_eq!(Flow::from(None), Flow::Proceed);
        assert_eq!(Flow::from(Some(ControlSignal::Continue)), Flow::Proceed);
        assert_eq!(Flow::from(Some(ControlSignal::SkipSiblings)), Flow::Break);
        assert_eq!(Flow::from(Some(ControlSignal::SkipSubtree)), Flow::SkipSubtree);
        assert_eq!(Flow::from(Some(ControlSignal::Terminate)), Flow::Terminate);
    }

    #[test]
    fn test_check_dir() {
        let temp = create_test_tree();
        assert!(check_dir(temp.path()).is_ok());
        assert!(matches!(
            check_dir(&temp.path().join("a.txt")),
            Err(TraverseError::NotADirectory { .. })
        ));
        assert!(matches!(
            check_dir(&temp.path().join("missing")),
            Err(TraverseError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_children_classifies() {
        let temp = create_test_tree();
        let mut children = list_children(temp.path());
        children.sort_by(sort::by_name);

        let summary: Vec<_> = children.iter().map(|e| (e.name(), e.entry_type)).collect();
        assert_eq!(
            summary,
            [("a.txt", EntryType::File), ("sub", EntryType::Directory)]
        );
    }

    #[test]
    fn test_walk_reports_terminate() {
        let temp = create_test_tree();
        let mut options = TraversalOptions::builder()
            .sort(sort::by_name)
            .visit(|e: &Entry| (e.name() == "b.txt").then_some(ControlSignal::Terminate))
            .build()
            .unwrap();

        let signal = Engine::new(&mut options).walk(temp.path(), None).unwrap();
        assert_eq!(signal, ControlSignal::Terminate);
    }

    #[test]
    fn test_walk_continue_without_visitor() {
        let temp = create_test_tree();
        let mut options = TraversalOptions::default();
        let signal = Engine::new(&mut options).walk(temp.path(), None).unwrap();
        assert_eq!(signal, ControlSignal::Continue);
    }
}
