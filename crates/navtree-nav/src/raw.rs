//! Declarative navigation entries as read from a configuration source.
//!
//! [`RawNode`] accepts every shape a sidebar declaration may use:
//!
//! ```yaml
//! - /about                      # bare path, title comes from the document
//! - [/fees-and-gas, Fees]       # path with explicit title
//! - path: /third-party          # mapping leaf
//!   title: Third Party
//! - title: Install              # group
//!   children: [/installation]
//! ```
//!
//! Deserialization never fails on a bad entry. Anything that matches none of
//! the shapes above is kept as [`RawNode::Other`] so that [`load`](crate::load)
//! can report it together with its location.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys recognized in the mapping form.
const ENTRY_KEYS: [&str; 3] = ["title", "path", "children"];

/// Un-validated navigation entry.
///
/// Serializes back to the declarative form it was read from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawNode {
    /// Bare path string.
    Path(String),
    /// `[path, title]` pair.
    Titled(String, String),
    /// Mapping with `title`, `path` and/or `children`.
    Entry(RawEntry),
    /// Unrecognized value.
    Other(Value),
}

/// Mapping form of a navigation entry.
///
/// `path` is kept as an arbitrary value so that a non-string path is reported
/// as an invalid path rather than an unrecognized node.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RawEntry {
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Target document path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    /// Child entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    /// Leaf entry with a bare path.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Group entry with a title and children.
    #[must_use]
    pub fn group(title: impl Into<String>, children: Vec<RawNode>) -> Self {
        Self::Entry(RawEntry {
            title: Some(title.into()),
            path: None,
            children: Some(children),
        })
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<Value> for RawNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(path) => Self::Path(path),
            Value::Array(items) => match <[Value; 2]>::try_from(items) {
                Ok([Value::String(path), Value::String(title)]) => Self::Titled(path, title),
                Ok(pair) => Self::Other(Value::Array(pair.into())),
                Err(items) => Self::Other(Value::Array(items)),
            },
            Value::Object(map) => entry_from_map(map).map_or_else(
                |map| Self::Other(Value::Object(map)),
                Self::Entry,
            ),
            other => Self::Other(other),
        }
    }
}

/// Build an entry from a mapping, handing the mapping back if it has unknown
/// keys or a mistyped `title`/`children`. A `null` field counts as absent.
fn entry_from_map(mut map: Map<String, Value>) -> Result<RawEntry, Map<String, Value>> {
    let known_keys = map.keys().all(|key| ENTRY_KEYS.contains(&key.as_str()));
    let title_ok = matches!(map.get("title"), None | Some(Value::Null | Value::String(_)));
    let children_ok = matches!(
        map.get("children"),
        None | Some(Value::Null | Value::Array(_))
    );
    if !(known_keys && title_ok && children_ok) {
        return Err(map);
    }

    let title = match map.remove("title") {
        Some(Value::String(title)) => Some(title),
        _ => None,
    };
    let path = map.remove("path").filter(|path| !path.is_null());
    let children = match map.remove("children") {
        Some(Value::Array(items)) => Some(items.into_iter().map(RawNode::from).collect()),
        _ => None,
    };

    Ok(RawEntry {
        title,
        path,
        children,
    })
}

/// Explain why a mapping was not accepted as an entry.
pub(crate) fn describe_mapping(map: &Map<String, Value>) -> String {
    if let Some(key) = map.keys().find(|key| !ENTRY_KEYS.contains(&key.as_str())) {
        return format!("unknown field `{key}`, expected one of `title`, `path`, `children`");
    }
    if let Some(title) = map.get("title").filter(|v| !v.is_null() && !v.is_string()) {
        return format!("`title` must be a string, found {}", value_kind(title));
    }
    if let Some(children) = map.get("children").filter(|v| !v.is_null() && !v.is_array()) {
        return format!("`children` must be a sequence, found {}", value_kind(children));
    }
    "unrecognized mapping".to_owned()
}

/// Short description of a JSON value's type for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
