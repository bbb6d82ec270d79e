//! Traversal options: configuration, filters, sort order and hooks.

use std::cmp::Ordering;
use std::fmt;

use treewalk_core::{
    BoxError, ControlSignal, Entry, EntryFilter, EntryKind, IntoSignal, Predicate, TraverseError,
    WalkConfig, depth_limit,
};

/// Boxed hook or visitor.
pub type Hook<'a> = Box<dyn FnMut(&Entry) -> Result<Option<ControlSignal>, BoxError> + 'a>;

/// Boxed sort comparator.
pub type Comparator<'a> = Box<dyn Fn(&Entry, &Entry) -> Ordering + 'a>;

pub(crate) fn hook<'a, F, R>(mut f: F) -> Hook<'a>
where
    F: FnMut(&Entry) -> R + 'a,
    R: IntoSignal,
{
    Box::new(move |entry: &Entry| f(entry).into_signal())
}

/// Fully parsed options for one traversal.
///
/// Built once through [`TraversalOptionsBuilder::build`], which validates the
/// filter combinations. The engine reads the configuration but never changes it.
pub struct TraversalOptions<'a> {
    pub(crate) config: WalkConfig,
    pub(crate) filter: EntryFilter,
    pub(crate) sort: Option<Comparator<'a>>,
    pub(crate) pre_dir: Option<Hook<'a>>,
    pub(crate) post_dir: Option<Hook<'a>>,
    pub(crate) visit: Option<Hook<'a>>,
}

impl<'a> TraversalOptions<'a> {
    /// Create a new options builder.
    pub fn builder() -> TraversalOptionsBuilder<'a> {
        TraversalOptionsBuilder::default()
    }

    /// The data-only part of the options.
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// The inclusion/exclusion filter.
    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    /// Check if a visitor is configured.
    pub fn has_visitor(&self) -> bool {
        self.visit.is_some()
    }
}

impl Default for TraversalOptions<'_> {
    fn default() -> Self {
        Self {
            config: WalkConfig::default(),
            filter: EntryFilter::none(),
            sort: None,
            pre_dir: None,
            post_dir: None,
            visit: None,
        }
    }
}

impl fmt::Debug for TraversalOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalOptions")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .field("sort", &self.sort.is_some())
            .field("pre_dir", &self.pre_dir.is_some())
            .field("post_dir", &self.post_dir.is_some())
            .field("visit", &self.visit.is_some())
            .finish()
    }
}

/// Builder for [`TraversalOptions`].
#[derive(Default)]
pub struct TraversalOptionsBuilder<'a> {
    config: WalkConfig,
    filter: Option<Predicate>,
    name_filter: Option<Predicate>,
    exclude_filter: Option<Predicate>,
    exclude_name_filter: Option<Predicate>,
    sort: Option<Comparator<'a>>,
    pre_dir: Option<Hook<'a>>,
    post_dir: Option<Hook<'a>>,
    visit: Option<Hook<'a>>,
}

impl<'a> TraversalOptionsBuilder<'a> {
    /// Replace the data-only configuration wholesale.
    pub fn config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    /// Which entries reach the visitor.
    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.config.kind = kind;
        self
    }

    /// Maximum recursion depth; any negative value means unlimited.
    pub fn max_depth(mut self, max_depth: i64) -> Self {
        self.config.max_depth = depth_limit(max_depth);
        self
    }

    /// Visit the root itself after its subtree.
    pub fn visit_root(mut self, visit_root: bool) -> Self {
        self.config.visit_root = visit_root;
        self
    }

    /// Apply the pre-directory hook to the root.
    pub fn pre_root(mut self, pre_root: bool) -> Self {
        self.config.pre_root = pre_root;
        self
    }

    /// Apply the post-directory hook to the root.
    pub fn post_root(mut self, post_root: bool) -> Self {
        self.config.post_root = post_root;
        self
    }

    /// Inclusion predicate tested against the whole entry.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Inclusion predicate tested against the entry name.
    pub fn name_filter(mut self, predicate: Predicate) -> Self {
        self.name_filter = Some(predicate);
        self
    }

    /// Exclusion predicate tested against the whole entry.
    pub fn exclude_filter(mut self, predicate: Predicate) -> Self {
        self.exclude_filter = Some(predicate);
        self
    }

    /// Exclusion predicate tested against the entry name.
    pub fn exclude_name_filter(mut self, predicate: Predicate) -> Self {
        self.exclude_name_filter = Some(predicate);
        self
    }

    /// Order each directory's children with a stable sort.
    pub fn sort<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&Entry, &Entry) -> Ordering + 'a,
    {
        self.sort = Some(Box::new(cmp));
        self
    }

    /// Hook run before descending into each directory.
    pub fn pre_dir<F, R>(mut self, f: F) -> Self
    where
        F: FnMut(&Entry) -> R + 'a,
        R: IntoSignal,
    {
        self.pre_dir = Some(hook(f));
        self
    }

    /// Hook run after each directory's subtree.
    pub fn post_dir<F, R>(mut self, f: F) -> Self
    where
        F: FnMut(&Entry) -> R + 'a,
        R: IntoSignal,
    {
        self.post_dir = Some(hook(f));
        self
    }

    /// Visitor called for each eligible entry.
    pub fn visit<F, R>(mut self, f: F) -> Self
    where
        F: FnMut(&Entry) -> R + 'a,
        R: IntoSignal,
    {
        self.visit = Some(hook(f));
        self
    }

    /// Validate and freeze the options.
    pub fn build(self) -> Result<TraversalOptions<'a>, TraverseError> {
        let filter = EntryFilter::new(
            self.filter,
            self.name_filter,
            self.exclude_filter,
            self.exclude_name_filter,
        )?;

        Ok(TraversalOptions {
            config: self.config,
            filter,
            sort: self.sort,
            pre_dir: self.pre_dir,
            post_dir: self.post_dir,
            visit: self.visit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let options = TraversalOptions::builder().build().unwrap();
        assert_eq!(options.config(), &WalkConfig::default());
        assert!(options.filter().is_empty());
        assert!(!options.has_visitor());
    }

    #[test]
    fn test_builder_sets_config() {
        let options = TraversalOptions::builder()
            .kind(EntryKind::Directories)
            .max_depth(-1)
            .visit_root(true)
            .pre_root(true)
            .post_root(true)
            .visit(|_: &Entry| ())
            .build()
            .unwrap();

        let config = options.config();
        assert_eq!(config.kind, EntryKind::Directories);
        assert_eq!(config.max_depth, None);
        assert!(config.visit_root && config.pre_root && config.post_root);
        assert!(options.has_visitor());
    }

    #[test]
    fn test_builder_rejects_conflicting_filters() {
        let err = TraversalOptions::builder()
            .filter(Predicate::equals("a"))
            .name_filter(Predicate::equals("a"))
            .build()
            .unwrap_err();
        assert!(err.is_config());

        let err = TraversalOptions::builder()
            .exclude_filter(Predicate::equals("a"))
            .exclude_name_filter(Predicate::equals("a"))
            .build()
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_debug_hides_closures() {
        let options = TraversalOptions::builder()
            .sort(|a: &Entry, b: &Entry| a.name.cmp(&b.name))
            .build()
            .unwrap();
        let debug = format!("{options:?}");
        assert!(debug.contains("sort: true"));
        assert!(debug.contains("visit: false"));
    }
}
