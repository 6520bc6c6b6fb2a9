//! Checking navigation paths against known documents.
//!
//! The loader only guarantees that paths are well formed. Whether a document
//! exists behind each path is answered by a [`DocumentIndex`]; the generator
//! can pass its own, or scan a docs directory with [`FsDocuments`].
//!
//! # URL Path Convention
//!
//! [`FsDocuments`] maps markdown files to URL paths the way the site
//! generator resolves them:
//! - `README.md` / `index.md` at the root → `/`
//! - `guide.md` → `/guide`
//! - `examples/README.md` / `examples/index.md` → `/examples`
//! - `examples/beacon.md` → `/examples/beacon`

use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use crate::node::NavTree;

/// Set of document paths known to the site generator.
pub trait DocumentIndex {
    /// Returns `true` if a document exists for the normalized `path`.
    fn contains(&self, path: &str) -> bool;
}

impl<S: BuildHasher> DocumentIndex for HashSet<String, S> {
    fn contains(&self, path: &str) -> bool {
        HashSet::contains(self, path)
    }
}

impl DocumentIndex for BTreeSet<String> {
    fn contains(&self, path: &str) -> bool {
        BTreeSet::contains(self, path)
    }
}

/// Leaf paths of `tree` that `index` does not know about.
///
/// Paths are returned in tree order, each at most once. A `#fragment` or
/// `?query` is ignored when looking the document up.
pub fn missing_documents<I>(tree: &NavTree, index: &I) -> Vec<String>
where
    I: DocumentIndex + ?Sized,
{
    let mut seen = HashSet::new();
    tree.flatten()
        .into_iter()
        .filter(|path| seen.insert(*path))
        .filter(|path| !index.contains(document_path(path)))
        .map(str::to_owned)
        .collect()
}

/// Strip the `#fragment` or `?query` from a leaf path.
fn document_path(path: &str) -> &str {
    match path.find(['#', '?']) {
        Some(0) => "/",
        Some(at) => &path[..at],
        None => path,
    }
}

/// Document index built by walking a docs directory.
#[derive(Debug, Default)]
pub struct FsDocuments {
    source_dir: PathBuf,
    paths: BTreeSet<String>,
}

impl FsDocuments {
    /// Scan `source_dir` for markdown documents.
    ///
    /// Hidden files and directories (e.g. `.vuepress`) are skipped. A missing
    /// or unreadable directory yields an empty index.
    #[must_use]
    pub fn scan(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let mut paths = BTreeSet::new();
        if source_dir.is_dir() {
            scan_directory(&source_dir, "", &mut paths);
        } else {
            tracing::warn!(path = %source_dir.display(), "Docs directory not found");
        }

        tracing::debug!(
            path = %source_dir.display(),
            documents = paths.len(),
            "Docs directory scanned"
        );

        Self { source_dir, paths }
    }

    /// Directory this index was built from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no documents were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Indexed URL paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl DocumentIndex for FsDocuments {
    fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

/// Collect URL paths of markdown files under `dir`.
fn scan_directory(dir: &Path, url_prefix: &str, paths: &mut BTreeSet<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read docs directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &format!("{url_prefix}/{name}"), paths);
            continue;
        }

        if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md")) {
            continue;
        }

        let Some(stem) = path.file_stem().map(OsStr::to_string_lossy) else {
            continue;
        };
        if stem.eq_ignore_ascii_case("readme") || stem.eq_ignore_ascii_case("index") {
            paths.insert(if url_prefix.is_empty() {
                "/".to_owned()
            } else {
                url_prefix.to_owned()
            });
        } else {
            paths.insert(format!("{url_prefix}/{stem}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_json;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Title\n").unwrap();
    }

    #[test]
    fn test_scan_maps_files_to_url_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "README.md");
        write(root, "about-mainchain.md");
        write(root, "examples/README.md");
        write(root, "examples/beacon.md");
        write(root, "guides/cloud/install-aws.md");

        let docs = FsDocuments::scan(root);

        assert_eq!(
            docs.iter().collect::<Vec<_>>(),
            vec![
                "/",
                "/about-mainchain",
                "/examples",
                "/examples/beacon",
                "/guides/cloud/install-aws"
            ]
        );
        assert_eq!(docs.source_dir(), root);
    }

    #[test]
    fn test_scan_index_md_is_directory_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "guides/index.md");

        let docs = FsDocuments::scan(temp_dir.path());

        assert!(docs.contains("/guides"));
    }

    #[test]
    fn test_scan_skips_hidden_and_non_markdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, ".vuepress/config.md");
        write(root, ".draft.md");
        fs::write(root.join("logo.png"), b"png").unwrap();
        write(root, "fees-and-gas.md");

        let docs = FsDocuments::scan(root);

        assert_eq!(docs.len(), 1);
        assert!(docs.contains("/fees-and-gas"));
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();

        let docs = FsDocuments::scan(temp_dir.path().join("nonexistent"));

        assert!(docs.is_empty());
    }

    #[test]
    fn test_missing_documents_in_tree_order() {
        let tree = parse_json(
            r#"[
                {"title": "About", "children": ["/third-party", "/about-mainchain", "/denomination"]},
                {"title": "Install", "children": ["/installation"]}
            ]"#,
        )
        .unwrap();
        let index: HashSet<String> = ["/about-mainchain".to_owned()].into_iter().collect();

        let missing = missing_documents(&tree, &index);

        assert_eq!(
            missing,
            vec!["/third-party", "/denomination", "/installation"]
        );
    }

    #[test]
    fn test_missing_documents_reported_once() {
        let tree = parse_json(r#"["/a", {"title": "G", "children": ["/a", "/b"]}]"#).unwrap();
        let index = BTreeSet::from(["/b".to_owned()]);

        assert_eq!(missing_documents(&tree, &index), vec!["/a"]);
    }

    #[test]
    fn test_missing_documents_ignores_fragment() {
        let tree = parse_json(r##"["/und-commands#send", "/#intro"]"##).unwrap();
        let index = BTreeSet::from(["/und-commands".to_owned(), "/".to_owned()]);

        assert!(missing_documents(&tree, &index).is_empty());
    }

    #[test]
    fn test_missing_documents_fragment_after_trailing_slash() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "guides/README.md");
        let docs = FsDocuments::scan(temp_dir.path());
        let tree = parse_json(r#"["/guides/#intro", "/guides/?tab=aws"]"#).unwrap();

        assert!(missing_documents(&tree, &docs).is_empty());
    }

    #[test]
    fn test_missing_documents_with_fs_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "join-testnet.md");
        let docs = FsDocuments::scan(temp_dir.path());
        let tree = parse_json(
            r#"[{"title": "TestNet", "children": ["/join-testnet", "/become-testnet-validator"]}]"#,
        )
        .unwrap();

        let index: &dyn DocumentIndex = &docs;

        assert_eq!(
            missing_documents(&tree, index),
            vec!["/become-testnet-validator"]
        );
    }
}
