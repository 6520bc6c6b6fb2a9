//! Navigation declaration loading.
//!
//! [`load`] makes a single pass over the declaration, deciding for every
//! [`RawNode`] whether it is a leaf or a group, validating it and normalizing
//! its path. The first invalid node aborts the load; no partial tree is
//! returned.

use serde_json::Value;

use crate::error::NavError;
use crate::node::{NavGroup, NavLeaf, NavNode, NavTree};
use crate::path::normalize_path;
use crate::raw::{RawEntry, RawNode, describe_mapping, value_kind};

/// Maximum nesting depth accepted by [`load`].
///
/// Declarations written as nested literals never come close. Anything deeper
/// is treated as a self-referential source (e.g. recursive YAML aliases).
pub const MAX_DEPTH: usize = 64;

/// Name of the top-level sequence in error locations.
const ROOT_LOCATION: &str = "sidebar";

/// Load and validate a navigation declaration.
///
/// # Errors
///
/// Returns the first [`NavError`] found, in declaration order:
/// - [`NavError::MalformedNode`] for nodes with both `path` and `children`,
///   with neither, or with an unrecognized shape
/// - [`NavError::MissingTitle`] for groups with a missing or blank title
/// - [`NavError::InvalidPath`] for empty, non-string or malformed leaf paths
/// - [`NavError::CyclicReference`] for nesting deeper than [`MAX_DEPTH`]
pub fn load(raw: &[RawNode]) -> Result<NavTree, NavError> {
    let roots = load_children(raw, ROOT_LOCATION, 1)?;
    let tree = NavTree::new(roots);

    tracing::debug!(
        nodes = tree.len(),
        leaves = tree.leaves().count(),
        depth = tree.depth(),
        "Navigation loaded"
    );

    Ok(tree)
}

/// Leaf paths of `tree` in depth-first pre-order.
#[must_use]
pub fn flatten(tree: &NavTree) -> Vec<&str> {
    tree.flatten()
}

/// Parse a YAML sequence of navigation entries and load it.
///
/// # Errors
///
/// Returns [`NavError::Parse`] if the YAML is malformed, otherwise any error
/// from [`load`].
pub fn parse_yaml(content: &str) -> Result<NavTree, NavError> {
    let raw: Vec<RawNode> =
        serde_yaml::from_str(content).map_err(|e| NavError::Parse(format!("Invalid YAML: {e}")))?;
    load(&raw)
}

/// Parse a JSON array of navigation entries and load it.
///
/// # Errors
///
/// Returns [`NavError::Parse`] if the JSON is malformed, otherwise any error
/// from [`load`].
pub fn parse_json(content: &str) -> Result<NavTree, NavError> {
    let raw: Vec<RawNode> =
        serde_json::from_str(content).map_err(|e| NavError::Parse(format!("Invalid JSON: {e}")))?;
    load(&raw)
}

fn load_children(raw: &[RawNode], parent: &str, depth: usize) -> Result<Vec<NavNode>, NavError> {
    raw.iter()
        .enumerate()
        .map(|(i, node)| load_node(node, &format!("{parent}[{i}]"), depth))
        .collect()
}

fn load_node(raw: &RawNode, location: &str, depth: usize) -> Result<NavNode, NavError> {
    if depth > MAX_DEPTH {
        return Err(NavError::CyclicReference {
            location: location.to_owned(),
            limit: MAX_DEPTH,
        });
    }

    match raw {
        RawNode::Path(path) => load_leaf(path, None, location),
        RawNode::Titled(path, title) => load_leaf(path, Some(title.as_str()), location),
        RawNode::Entry(entry) => load_entry(entry, location, depth),
        RawNode::Other(value) => Err(reject_other(value, location)),
    }
}

fn load_entry(entry: &RawEntry, location: &str, depth: usize) -> Result<NavNode, NavError> {
    match (&entry.path, &entry.children) {
        (Some(_), Some(_)) => Err(malformed(location, "node has both `path` and `children`")),
        (Some(Value::String(path)), None) => load_leaf(path, entry.title.as_deref(), location),
        (Some(other), None) => Err(NavError::InvalidPath {
            location: location.to_owned(),
            reason: format!("path must be a string, found {}", value_kind(other)),
        }),
        (None, Some(children)) => {
            let title = entry
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .ok_or_else(|| NavError::MissingTitle {
                    location: location.to_owned(),
                })?;
            let children = load_children(children, &format!("{location}.children"), depth + 1)?;
            if children.is_empty() {
                tracing::debug!(location, title, "Navigation group has no children");
            }
            Ok(NavNode::Group(NavGroup {
                title: title.to_owned(),
                children,
            }))
        }
        (None, None) if entry.title.is_some() => {
            Err(malformed(location, "group has no `children`"))
        }
        (None, None) => Err(malformed(location, "node has neither `path` nor `children`")),
    }
}

fn load_leaf(path: &str, title: Option<&str>, location: &str) -> Result<NavNode, NavError> {
    let path = normalize_path(path).map_err(|e| NavError::InvalidPath {
        location: location.to_owned(),
        reason: e.to_string(),
    })?;
    let title = title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned);

    Ok(NavNode::Leaf(NavLeaf { title, path }))
}

fn reject_other(value: &Value, location: &str) -> NavError {
    match value {
        Value::Object(map) => malformed(location, &describe_mapping(map)),
        Value::Array(items) => match items.iter().find(|item| !item.is_string()) {
            Some(item) if items.len() == 2 => malformed(
                location,
                &format!(
                    "[path, title] pair must hold two strings, found {}",
                    value_kind(item)
                ),
            ),
            _ => malformed(
                location,
                &format!(
                    "sequence entries must be a [path, title] pair of strings, found {} items",
                    items.len()
                ),
            ),
        },
        other => NavError::InvalidPath {
            location: location.to_owned(),
            reason: format!("leaf must be a string path, found {}", value_kind(other)),
        },
    }
}

fn malformed(location: &str, reason: &str) -> NavError {
    NavError::MalformedNode {
        location: location.to_owned(),
        reason: reason.to_owned(),
    }
}
