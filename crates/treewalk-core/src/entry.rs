//! Entry types produced while listing a directory.

use std::fmt;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else: broken symlinks, sockets, devices.
    Other,
}

/// Which entries are surfaced to the visitor.
///
/// Directories are recursed into regardless of the kind; the kind only
/// decides what the visitor gets to see.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Files and directories.
    #[default]
    Any,
    /// Only non-directories.
    Files,
    /// Only directories.
    Directories,
}

impl EntryKind {
    /// Whether directories reach the visitor.
    pub fn surfaces_dirs(self) -> bool {
        self != EntryKind::Files
    }

    /// Whether non-directories reach the visitor.
    pub fn surfaces_files(self) -> bool {
        self != EntryKind::Directories
    }

    /// Check if an entry of the given type is surfaced.
    pub fn admits(self, entry_type: EntryType) -> bool {
        match entry_type {
            EntryType::Directory => self.surfaces_dirs(),
            EntryType::File | EntryType::Other => self.surfaces_files(),
        }
    }
}

/// A file or directory discovered while listing its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Last path component.
    pub name: CompactString,
    /// What the path points at.
    pub entry_type: EntryType,
}

impl Entry {
    /// Create an entry with a known type.
    pub fn new(path: impl Into<PathBuf>, entry_type: EntryType) -> Self {
        let path = path.into();
        let name = name_of(&path);
        Self {
            path,
            name,
            entry_type,
        }
    }

    /// Classify a path by reading its metadata, following symlinks.
    ///
    /// Paths whose metadata cannot be read are classified as `Other`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entry_type = match std::fs::metadata(&path) {
            Ok(m) if m.is_dir() => EntryType::Directory,
            Ok(m) if m.is_file() => EntryType::File,
            _ => EntryType::Other,
        };
        Self::new(path, entry_type)
    }

    /// Get the full path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

fn name_of(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_from_path() {
        let entry = Entry::new("/tmp/root/a.txt", EntryType::File);
        assert_eq!(entry.name(), "a.txt");
        assert!(entry.is_file());
        assert!(!entry.is_dir());
    }

    #[test]
    fn test_entry_name_falls_back_to_path() {
        let entry = Entry::new("/", EntryType::Directory);
        assert_eq!(entry.name(), "/");
    }

    #[test]
    fn test_kind_admits() {
        assert!(EntryKind::Any.admits(EntryType::File));
        assert!(EntryKind::Any.admits(EntryType::Directory));
        assert!(!EntryKind::Files.admits(EntryType::Directory));
        assert!(EntryKind::Files.admits(EntryType::Other));
        assert!(!EntryKind::Directories.admits(EntryType::File));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("files".parse::<EntryKind>().unwrap(), EntryKind::Files);
        assert_eq!("DIRECTORIES".parse::<EntryKind>().unwrap(), EntryKind::Directories);
        assert_eq!(EntryKind::Any.to_string(), "any");
        assert!("folders".parse::<EntryKind>().is_err());
    }
}
