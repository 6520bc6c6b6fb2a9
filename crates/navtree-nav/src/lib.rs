//! Navigation tree loading for documentation sites.
//!
//! This crate provides:
//! - [`RawNode`]: declarative sidebar entries as read from TOML, YAML or JSON
//! - [`load`]: validation and normalization of raw entries into a [`NavTree`]
//! - [`flatten`]: depth-first listing of the leaf paths of a tree
//! - [`DocumentIndex`] and [`FsDocuments`]: checking leaf paths against the
//!   documents that actually exist
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use navtree_nav::{flatten, load, RawNode};
//!
//! let raw: Vec<RawNode> = serde_json::from_str(
//!     r#"[{"title": "Guide", "children": ["/install", "/usage/"]}]"#,
//! )?;
//! let tree = load(&raw)?;
//!
//! assert_eq!(flatten(&tree), vec!["/install", "/usage"]);
//! # Ok(())
//! # }
//! ```

mod documents;
mod error;
mod loader;
mod node;
mod path;
mod raw;

pub use documents::{DocumentIndex, FsDocuments, missing_documents};
pub use error::NavError;
pub use loader::{MAX_DEPTH, flatten, load, parse_json, parse_yaml};
pub use node::{Leaves, NavGroup, NavLeaf, NavNode, NavTree};
pub use path::{PathError, normalize_path};
pub use raw::{RawEntry, RawNode};
