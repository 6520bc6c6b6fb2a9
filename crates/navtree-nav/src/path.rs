//! Leaf path normalization.
//!
//! Sidebar paths are URL paths rooted at `/`:
//! - `"about"` becomes `"/about"`
//! - `"/guides/cloud/"` becomes `"/guides/cloud"`
//! - `"//examples//beacon"` becomes `"/examples/beacon"`
//! - `"/"` stays `"/"`
//! - `"/guides/#intro"` becomes `"/guides#intro"`
//!
//! A `#fragment` or `?query` suffix is kept verbatim after the normalized
//! document part.

/// Reason a path was rejected by [`normalize_path`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path is empty, whitespace only, or made of `.` segments only.
    #[error("path is empty")]
    Empty,
    /// Path contains whitespace.
    #[error("path contains whitespace")]
    Whitespace,
    /// Path contains a `..` segment.
    #[error("path contains a '..' segment")]
    ParentSegment,
    /// Path is an absolute URL.
    #[error("path is an external URL; external links belong in the top-bar nav")]
    External,
}

/// Normalize a sidebar path.
///
/// Surrounding whitespace is trimmed, a leading slash is enforced, repeated
/// slashes and `.` segments are collapsed, and the trailing slash is stripped
/// (except for the root path `/`). Only the part before the first `#` or `?`
/// is normalized. Normalizing an already normalized path returns it unchanged.
///
/// # Errors
///
/// Returns [`PathError`] if the path is empty or only `.` segments, contains
/// whitespace or a `..` segment, or carries a URL scheme.
pub fn normalize_path(raw: &str) -> Result<String, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if trimmed.contains("://") {
        return Err(PathError::External);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(PathError::Whitespace);
    }

    let (document, suffix) = trimmed
        .find(['#', '?'])
        .map_or((trimmed, ""), |at| trimmed.split_at(at));

    let segments: Vec<&str> = document
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if segments.contains(&"..") {
        return Err(PathError::ParentSegment);
    }

    // "." or "./" has no segments left but is not a way to spell the root.
    if segments.is_empty() && document.contains('.') {
        return Err(PathError::Empty);
    }

    let mut normalized = String::with_capacity(trimmed.len() + 1);
    for segment in segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized.push_str(suffix);
    Ok(normalized)
}
