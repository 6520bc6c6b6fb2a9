//! Validated navigation tree.
//!
//! A [`NavTree`] is built once by [`load`](crate::load) and never mutated.
//! It serializes to the shape the page renderer consumes:
//!
//! ```json
//! [
//!   {"title": "About", "children": [{"path": "/about"}]},
//!   {"title": "Fees", "path": "/fees-and-gas"}
//! ]
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::raw::{RawEntry, RawNode};

/// Navigation node: either a leaf pointing at a document or a titled group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavNode {
    /// Link to a single document.
    Leaf(NavLeaf),
    /// Menu heading with ordered children.
    Group(NavGroup),
}

/// Leaf node referencing a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLeaf {
    /// Explicit display title. `None` means the renderer takes the title
    /// from the target document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Normalized document path (e.g., "/about-mainchain").
    pub path: String,
}

/// Group node with a heading and children in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Menu heading.
    pub title: String,
    /// Child nodes in display order.
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// Leaf reference if this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&NavLeaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Group reference if this node is a group.
    #[must_use]
    pub fn as_group(&self) -> Option<&NavGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    /// Display title, if the node carries one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.title.as_deref(),
            Self::Group(group) => Some(&group.title),
        }
    }

    /// Declarative form of this node.
    fn to_raw(&self) -> RawNode {
        match self {
            Self::Leaf(NavLeaf { title: None, path }) => RawNode::Path(path.clone()),
            Self::Leaf(NavLeaf {
                title: Some(title),
                path,
            }) => RawNode::Entry(RawEntry {
                title: Some(title.clone()),
                path: Some(Value::String(path.clone())),
                children: None,
            }),
            Self::Group(group) => RawNode::Entry(RawEntry {
                title: Some(group.title.clone()),
                path: None,
                children: Some(group.children.iter().map(Self::to_raw).collect()),
            }),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(group) => 1 + group.children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(group) => 1 + group.children.iter().map(Self::count).sum::<usize>(),
        }
    }
}

/// Ordered navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    roots: Vec<NavNode>,
}

impl NavTree {
    pub(crate) fn new(roots: Vec<NavNode>) -> Self {
        Self { roots }
    }

    /// Top-level nodes in display order.
    #[must_use]
    pub fn roots(&self) -> &[NavNode] {
        &self.roots
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, groups included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.iter().map(NavNode::count).sum()
    }

    /// Maximum nesting depth (0 for an empty tree, 1 for a flat list).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.roots.iter().map(NavNode::depth).max().unwrap_or(0)
    }

    /// Iterate over leaves in depth-first pre-order.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.roots.iter()],
        }
    }

    /// Leaf paths in depth-first pre-order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&str> {
        self.leaves().map(|leaf| leaf.path.as_str()).collect()
    }

    /// First leaf with the given normalized path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&NavLeaf> {
        self.leaves().find(|leaf| leaf.path == path)
    }

    /// Declarative form of the tree.
    ///
    /// Untitled leaves become bare strings. Loading the result yields a tree
    /// equal to `self`.
    #[must_use]
    pub fn to_raw(&self) -> Vec<RawNode> {
        self.roots.iter().map(NavNode::to_raw).collect()
    }
}

/// Depth-first pre-order iterator over the leaves of a [`NavTree`].
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, NavNode>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a NavLeaf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.stack.last_mut() {
            match level.next() {
                Some(NavNode::Leaf(leaf)) => return Some(leaf),
                Some(NavNode::Group(group)) => self.stack.push(group.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(path: &str) -> NavNode {
        NavNode::Leaf(NavLeaf {
            title: None,
            path: path.to_owned(),
        })
    }

    fn titled(path: &str, title: &str) -> NavNode {
        NavNode::Leaf(NavLeaf {
            title: Some(title.to_owned()),
            path: path.to_owned(),
        })
    }

    fn group(title: &str, children: Vec<NavNode>) -> NavNode {
        NavNode::Group(NavGroup {
            title: title.to_owned(),
            children,
        })
    }

    fn sample_tree() -> NavTree {
        NavTree::new(vec![
            group("About", vec![leaf("/about"), leaf("/denomination")]),
            group(
                "Guides",
                vec![group("Cloud", vec![leaf("/guides/cloud/install-aws")])],
            ),
            titled("/third-party", "Third Party"),
        ])
    }

    #[test]
    fn test_empty_tree() {
        let tree = NavTree::default();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.flatten().is_empty());
    }

    #[test]
    fn test_flatten_is_depth_first_pre_order() {
        let tree = sample_tree();

        assert_eq!(
            tree.flatten(),
            vec![
                "/about",
                "/denomination",
                "/guides/cloud/install-aws",
                "/third-party"
            ]
        );
    }

    #[test]
    fn test_len_counts_groups_and_leaves() {
        assert_eq!(sample_tree().len(), 7);
    }

    #[test]
    fn test_depth() {
        assert_eq!(sample_tree().depth(), 3);
        assert_eq!(NavTree::new(vec![leaf("/a")]).depth(), 1);
    }

    #[test]
    fn test_empty_group_has_depth_one() {
        let tree = NavTree::new(vec![group("Empty", Vec::new())]);
        assert_eq!(tree.depth(), 1);
        assert!(tree.flatten().is_empty());
    }

    #[test]
    fn test_find_leaf() {
        let tree = sample_tree();

        let found = tree.find("/third-party").unwrap();
        assert_eq!(found.title.as_deref(), Some("Third Party"));
        assert!(tree.find("/missing").is_none());
    }

    #[test]
    fn test_node_accessors() {
        let node = group("About", vec![leaf("/about")]);
        assert_eq!(node.title(), Some("About"));
        assert!(node.as_group().is_some());
        assert!(node.as_leaf().is_none());

        let node = leaf("/about");
        assert_eq!(node.title(), None);
        assert_eq!(node.as_leaf().unwrap().path, "/about");
    }

    #[test]
    fn test_to_raw_uses_compact_form() {
        let tree = sample_tree();

        let json = serde_json::to_value(tree.to_raw()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"title": "About", "children": ["/about", "/denomination"]},
                {"title": "Guides", "children": [
                    {"title": "Cloud", "children": ["/guides/cloud/install-aws"]}
                ]},
                {"title": "Third Party", "path": "/third-party"}
            ])
        );
    }

    #[test]
    fn test_serialization_for_renderer() {
        let tree = sample_tree();

        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json[0]["title"], "About");
        assert_eq!(json[0]["children"][0]["path"], "/about");
        assert!(json[0]["children"][0].get("title").is_none()); // Derived by renderer
        assert!(json[0].get("path").is_none());
        assert_eq!(json[2]["title"], "Third Party");
        assert_eq!(json[2]["path"], "/third-party");
        assert!(json[2].get("children").is_none());
    }
}
