//! Inclusion and exclusion predicates over entries or their names.
//!
//! A [`Predicate`] is a tagged union of the ways a value can "match" a
//! candidate: equality, a type test, a whole-string regex, membership in a
//! set or range, a glob, or an arbitrary closure. An [`EntryFilter`] pairs an
//! optional inclusion filter with an optional exclusion filter and decides
//! whether an entry is eligible for the visitor.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::entry::{Entry, EntryType};
use crate::error::TraverseError;

/// Value a predicate is tested against.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// The whole entry; its string form is the path.
    Entry(&'a Entry),
    /// Only the entry name.
    Name(&'a str),
}

impl<'a> Candidate<'a> {
    /// String form used by equality, regex, glob and membership tests.
    pub fn as_text(&self) -> Cow<'a, str> {
        match *self {
            Candidate::Entry(entry) => entry.path.to_string_lossy(),
            Candidate::Name(name) => Cow::Borrowed(name),
        }
    }
}

/// Type test for [`Predicate::TypeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTest {
    /// Any entry candidate.
    Entry,
    /// An entry that is a regular file.
    File,
    /// An entry that is a directory.
    Directory,
    /// A name candidate.
    Name,
}

impl TypeTest {
    fn accepts(self, candidate: &Candidate<'_>) -> bool {
        match (self, candidate) {
            (TypeTest::Entry, Candidate::Entry(_)) => true,
            (TypeTest::File, Candidate::Entry(e)) => e.entry_type == EntryType::File,
            (TypeTest::Directory, Candidate::Entry(e)) => e.entry_type == EntryType::Directory,
            (TypeTest::Name, Candidate::Name(_)) => true,
            _ => false,
        }
    }
}

/// A regex that must match the whole string.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern, anchoring it at both ends.
    pub fn new(pattern: &str) -> Result<Self, TraverseError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            TraverseError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check for a whole-string match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Collection used by [`Predicate::Membership`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Members {
    /// Exact members.
    Set(BTreeSet<String>),
    /// Inclusive lexicographic range.
    Range { start: String, end: String },
}

impl Members {
    /// Build a set from any string iterator.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Members::Set(items.into_iter().map(Into::into).collect())
    }

    fn contains(&self, text: &str) -> bool {
        match self {
            Members::Set(set) => set.contains(text),
            Members::Range { start, end } => start.as_str() <= text && text <= end.as_str(),
        }
    }
}

type MatchFn = dyn Fn(Candidate<'_>) -> bool + Send + Sync;

/// Polymorphic match test.
#[derive(Clone)]
pub enum Predicate {
    /// String form equals the value.
    Equals(String),
    /// Candidate is of the given type.
    TypeCheck(TypeTest),
    /// String form matches the whole regex.
    RegexMatch(Pattern),
    /// String form is contained in the collection.
    Membership(Members),
    /// String form matches the glob.
    Glob(GlobMatcher),
    /// Arbitrary test.
    Custom(Arc<MatchFn>),
}

impl Predicate {
    /// Equality predicate.
    pub fn equals(value: impl Into<String>) -> Self {
        Predicate::Equals(value.into())
    }

    /// Whole-string regex predicate.
    pub fn regex(pattern: &str) -> Result<Self, TraverseError> {
        Ok(Predicate::RegexMatch(Pattern::new(pattern)?))
    }

    /// Glob predicate.
    pub fn glob(pattern: &str) -> Result<Self, TraverseError> {
        let glob = Glob::new(pattern).map_err(|e| TraverseError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Predicate::Glob(glob.compile_matcher()))
    }

    /// Membership predicate over a set of strings.
    pub fn one_of<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::Membership(Members::set(items))
    }

    /// Membership predicate over an inclusive lexicographic range.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Predicate::Membership(Members::Range {
            start: start.into(),
            end: end.into(),
        })
    }

    /// Predicate backed by a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Candidate<'_>) -> bool + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(f))
    }

    /// Test the predicate against a candidate.
    pub fn matches(&self, candidate: Candidate<'_>) -> bool {
        match self {
            Predicate::Equals(value) => candidate.as_text() == value.as_str(),
            Predicate::TypeCheck(test) => test.accepts(&candidate),
            Predicate::RegexMatch(pattern) => pattern.is_match(&candidate.as_text()),
            Predicate::Membership(members) => members.contains(&candidate.as_text()),
            Predicate::Glob(glob) => glob.is_match(candidate.as_text().as_ref()),
            Predicate::Custom(f) => f(candidate),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals(v) => f.debug_tuple("Equals").field(v).finish(),
            Predicate::TypeCheck(t) => f.debug_tuple("TypeCheck").field(t).finish(),
            Predicate::RegexMatch(p) => f.debug_tuple("RegexMatch").field(&p.as_str()).finish(),
            Predicate::Membership(m) => f.debug_tuple("Membership").field(m).finish(),
            Predicate::Glob(g) => f.debug_tuple("Glob").field(&g.glob().glob()).finish(),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// What part of an entry a filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The whole entry.
    Entry,
    /// The entry name.
    Name,
}

/// A predicate aimed at an entry or its name.
#[derive(Debug, Clone)]
pub struct Filter {
    pub target: Target,
    pub predicate: Predicate,
}

impl Filter {
    /// Test an entry.
    pub fn matches(&self, entry: &Entry) -> bool {
        let candidate = match self.target {
            Target::Entry => Candidate::Entry(entry),
            Target::Name => Candidate::Name(entry.name()),
        };
        self.predicate.matches(candidate)
    }
}

/// Inclusion/exclusion decision for the visitor.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    include: Option<Filter>,
    exclude: Option<Filter>,
}

impl EntryFilter {
    /// Combine the four optional filters.
    ///
    /// At most one of `filter`/`name_filter` and at most one of
    /// `exclude_filter`/`exclude_name_filter` may be set.
    pub fn new(
        filter: Option<Predicate>,
        name_filter: Option<Predicate>,
        exclude_filter: Option<Predicate>,
        exclude_name_filter: Option<Predicate>,
    ) -> Result<Self, TraverseError> {
        let include = pick(filter, name_filter, "filter", "nameFilter")?;
        let exclude = pick(exclude_filter, exclude_name_filter, "excludeFilter", "excludeNameFilter")?;
        Ok(Self { include, exclude })
    }

    /// A filter that admits everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if no predicate is configured.
    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }

    /// Eligible iff the inclusion filter (if any) matches and the exclusion
    /// filter (if any) does not.
    pub fn admits(&self, entry: &Entry) -> bool {
        let included = self.include.as_ref().is_none_or(|f| f.matches(entry));
        let excluded = self.exclude.as_ref().is_some_and(|f| f.matches(entry));
        included && !excluded
    }
}

fn pick(
    on_entry: Option<Predicate>,
    on_name: Option<Predicate>,
    entry_key: &str,
    name_key: &str,
) -> Result<Option<Filter>, TraverseError> {
    match (on_entry, on_name) {
        (Some(_), Some(_)) => Err(TraverseError::config(format!(
            "Can't set both '{entry_key}' and '{name_key}'"
        ))),
        (Some(predicate), None) => Ok(Some(Filter {
            target: Target::Entry,
            predicate,
        })),
        (None, Some(predicate)) => Ok(Some(Filter {
            target: Target::Name,
            predicate,
        })),
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> Entry {
        Entry::new(path, EntryType::File)
    }

    #[test]
    fn test_regex_is_whole_match() {
        let p = Predicate::regex(r".*\.txt").unwrap();
        assert!(p.matches(Candidate::Name("a.txt")));
        assert!(!p.matches(Candidate::Name("a.txt.bak")));

        let p = Predicate::regex("a|ab").unwrap();
        assert!(p.matches(Candidate::Name("ab")));
    }

    #[test]
    fn test_invalid_regex() {
        let err = Predicate::regex("(unclosed").unwrap_err();
        assert!(matches!(err, TraverseError::InvalidPattern { .. }));
    }

    #[test]
    fn test_equals_uses_path_for_entries() {
        let entry = file("/r/a.txt");
        assert!(Predicate::equals("/r/a.txt").matches(Candidate::Entry(&entry)));
        assert!(!Predicate::equals("a.txt").matches(Candidate::Entry(&entry)));
        assert!(Predicate::equals("a.txt").matches(Candidate::Name("a.txt")));
    }

    #[test]
    fn test_type_check() {
        let f = file("/r/a.txt");
        let d = Entry::new("/r/sub", EntryType::Directory);
        let dirs = Predicate::TypeCheck(TypeTest::Directory);
        assert!(dirs.matches(Candidate::Entry(&d)));
        assert!(!dirs.matches(Candidate::Entry(&f)));
        assert!(!dirs.matches(Candidate::Name("sub")));
        assert!(Predicate::TypeCheck(TypeTest::Name).matches(Candidate::Name("sub")));
        assert!(Predicate::TypeCheck(TypeTest::Entry).matches(Candidate::Entry(&f)));
    }

    #[test]
    fn test_membership() {
        let set = Predicate::one_of(["a.txt", "b.txt"]);
        assert!(set.matches(Candidate::Name("b.txt")));
        assert!(!set.matches(Candidate::Name("c.txt")));

        let range = Predicate::between("b", "d");
        assert!(range.matches(Candidate::Name("c.txt")));
        assert!(!range.matches(Candidate::Name("a.txt")));
        assert!(!range.matches(Candidate::Name("e")));
    }

    #[test]
    fn test_glob_and_custom() {
        let glob = Predicate::glob("*.rs").unwrap();
        assert!(glob.matches(Candidate::Name("main.rs")));
        assert!(!glob.matches(Candidate::Name("main.go")));

        let short = Predicate::custom(|c| c.as_text().len() <= 3);
        assert!(short.matches(Candidate::Name("a.b")));
        assert!(!short.matches(Candidate::Name("abcd")));
    }

    #[test]
    fn test_both_include_filters_rejected() {
        let err = EntryFilter::new(
            Some(Predicate::equals("x")),
            Some(Predicate::equals("y")),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("nameFilter"));
    }

    #[test]
    fn test_both_exclude_filters_rejected() {
        let err = EntryFilter::new(
            None,
            None,
            Some(Predicate::equals("x")),
            Some(Predicate::equals("y")),
        )
        .unwrap_err();
        assert!(err.to_string().contains("excludeNameFilter"));
    }

    #[test]
    fn test_include_and_exclude_combine() {
        let filter = EntryFilter::new(
            None,
            Some(Predicate::regex(r".*\.txt").unwrap()),
            None,
            Some(Predicate::equals("skip.txt")),
        )
        .unwrap();

        assert!(filter.admits(&file("/r/a.txt")));
        assert!(!filter.admits(&file("/r/skip.txt")));
        assert!(!filter.admits(&file("/r/a.bak")));
        assert!(EntryFilter::none().admits(&file("/r/a.bak")));
    }
}
