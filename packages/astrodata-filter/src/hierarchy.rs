//! Category hierarchy discovered from the data.
//!
//! Every category path seen in any record is inserted segment by segment:
//!
//! ```text
//! (root)
//! ├── Entertainment
//! │   └── Actor
//! │       └── TV
//! └── Sports
//!     └── Football
//! ```
//!
//! The tree is built from the whole dataset, never from a filtered subset.

use std::collections::BTreeMap;

use serde::Serialize;

/// A node in the category tree. Children are keyed by segment text and kept
/// sorted so they can be offered as options directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryNode {
    children: BTreeMap<String, CategoryNode>,
}

impl CategoryNode {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from any number of paths.
    ///
    /// # Examples
    /// ```
    /// use astrodata_filter::hierarchy::CategoryNode;
    ///
    /// let tree = CategoryNode::build([vec!["Sports", "Football"], vec!["Sports"]]);
    /// assert_eq!(tree.children_at(&[] as &[&str]), vec!["Sports"]);
    /// assert_eq!(tree.children_at(&["Sports"]), vec!["Football"]);
    /// ```
    pub fn build<P, S>(paths: impl IntoIterator<Item = P>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Self::new();
        for path in paths {
            root.insert(path);
        }
        root
    }

    /// Insert one path, creating missing nodes.
    pub fn insert<S: AsRef<str>>(&mut self, path: impl IntoIterator<Item = S>) {
        let mut node = self;
        for segment in path {
            node = node
                .children
                .entry(segment.as_ref().to_string())
                .or_default();
        }
    }

    /// The node reached by following `path`, if every segment exists.
    #[must_use]
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&CategoryNode> {
        path.iter()
            .try_fold(self, |node, segment| node.children.get(segment.as_ref()))
    }

    /// Whether `path` is a prefix observed in the data.
    #[must_use]
    pub fn contains_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get(path).is_some()
    }

    /// Sorted choices for the level after `path`; empty if `path` is unknown.
    #[must_use]
    pub fn children_at<S: AsRef<str>>(&self, path: &[S]) -> Vec<&str> {
        self.get(path)
            .map(|node| node.children.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Longest prefix of `path` that exists in the tree.
    ///
    /// Used to drop deeper selections that no longer fit after an upper
    /// level changed.
    #[must_use]
    pub fn valid_prefix<S: AsRef<str>>(&self, path: &[S]) -> Vec<String> {
        let mut node = self;
        let mut prefix = Vec::new();
        for segment in path {
            match node.children.get(segment.as_ref()) {
                Some(child) => {
                    prefix.push(segment.as_ref().to_string());
                    node = child;
                }
                None => break,
            }
        }
        prefix
    }

    /// Direct children, sorted by segment.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Length of the longest path below this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}
