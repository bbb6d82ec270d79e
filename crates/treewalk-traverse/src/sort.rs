//! Ready-made comparators for per-directory ordering.
//!
//! Any `Fn(&Entry, &Entry) -> Ordering` works as a comparator; these cover
//! the common cases. Sorting is applied to one directory's children at a time.

use std::cmp::Ordering;

use treewalk_core::Entry;

/// Order by entry name.
pub fn by_name(a: &Entry, b: &Entry) -> Ordering {
    a.name.cmp(&b.name)
}

/// Order by full path.
pub fn by_path(a: &Entry, b: &Entry) -> Ordering {
    a.path.cmp(&b.path)
}

/// Directories before everything else, then by name.
pub fn directories_first(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir().cmp(&a.is_dir()).then_with(|| by_name(a, b))
}

/// Non-directories before directories, then by name.
pub fn files_first(a: &Entry, b: &Entry) -> Ordering {
    a.is_dir().cmp(&b.is_dir()).then_with(|| by_name(a, b))
}

/// Reverse another comparator.
pub fn reversed<F>(cmp: F) -> impl Fn(&Entry, &Entry) -> Ordering
where
    F: Fn(&Entry, &Entry) -> Ordering,
{
    move |a: &Entry, b: &Entry| cmp(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treewalk_core::EntryType;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("/r/b.txt", EntryType::File),
            Entry::new("/r/sub", EntryType::Directory),
            Entry::new("/r/a.txt", EntryType::File),
            Entry::new("/r/alpha", EntryType::Directory),
        ]
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn test_by_name() {
        let mut list = entries();
        list.sort_by(by_name);
        assert_eq!(names(&list), ["a.txt", "alpha", "b.txt", "sub"]);
    }

    #[test]
    fn test_directories_first() {
        let mut list = entries();
        list.sort_by(directories_first);
        assert_eq!(names(&list), ["alpha", "sub", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_files_first() {
        let mut list = entries();
        list.sort_by(files_first);
        assert_eq!(names(&list), ["a.txt", "b.txt", "alpha", "sub"]);
    }

    #[test]
    fn test_reversed() {
        let mut list = entries();
        list.sort_by(reversed(by_path));
        assert_eq!(names(&list), ["sub", "b.txt", "alpha", "a.txt"]);
    }
}
