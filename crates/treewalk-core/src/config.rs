//! Walk configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::entry::EntryKind;

/// Data-only options for a traversal.
///
/// Hooks, filters and the sort comparator live alongside this in the
/// traversal options; everything here is plain data and serializable.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct WalkConfig {
    /// Which entries reach the visitor.
    #[builder(default)]
    #[serde(default)]
    pub kind: EntryKind,

    /// Directory levels below the root to recurse into (None = unlimited,
    /// Some(0) = immediate children only).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Pass the root itself to the visitor, after its subtree.
    #[builder(default = "false")]
    #[serde(default)]
    pub visit_root: bool,

    /// Run the pre-directory hook on the root.
    #[builder(default = "false")]
    #[serde(default)]
    pub pre_root: bool,

    /// Run the post-directory hook on the root.
    #[builder(default = "false")]
    #[serde(default)]
    pub post_root: bool,
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Config that only lists the root's immediate children.
    pub fn shallow(kind: EntryKind) -> Self {
        Self {
            kind,
            max_depth: Some(0),
            ..Self::default()
        }
    }

    /// Config that recurses without limit.
    pub fn recursive(kind: EntryKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            kind: EntryKind::Any,
            max_depth: None,
            visit_root: false,
            pre_root: false,
            post_root: false,
        }
    }
}

/// Convert a signed depth where any negative value means unlimited.
pub fn depth_limit(max_depth: i64) -> Option<u32> {
    if max_depth < 0 {
        None
    } else {
        Some(u32::try_from(max_depth).unwrap_or(u32::MAX))
    }
}
