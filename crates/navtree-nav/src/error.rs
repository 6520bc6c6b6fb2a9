//! Navigation loading errors.

/// Error returned when a navigation declaration cannot be loaded.
///
/// Every variant except [`NavError::Parse`] carries the location of the
/// offending node, e.g. `sidebar[1].children[0]`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Node violates the leaf/group exclusivity rule or has an unrecognized shape.
    #[error("Malformed navigation node at {location}: {reason}")]
    MalformedNode {
        /// Location of the node in the declaration.
        location: String,
        /// What is wrong with the node.
        reason: String,
    },
    /// Group node has no title, or an empty one.
    #[error("Navigation group at {location} is missing a title")]
    MissingTitle {
        /// Location of the group in the declaration.
        location: String,
    },
    /// Leaf path is empty, not a string, or malformed.
    #[error("Invalid navigation path at {location}: {reason}")]
    InvalidPath {
        /// Location of the leaf in the declaration.
        location: String,
        /// What is wrong with the path.
        reason: String,
    },
    /// Nesting exceeds the depth a tree built from literals can reach.
    #[error("Cyclic reference at {location}: nesting exceeds {limit} levels")]
    CyclicReference {
        /// Location of the node where the limit was crossed.
        location: String,
        /// Maximum allowed depth.
        limit: usize,
    },
    /// Declaration could not be parsed from its source format.
    #[error("Navigation parse error: {0}")]
    Parse(String),
}

impl NavError {
    /// Location of the offending node, if the error is tied to one.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::MalformedNode { location, .. }
            | Self::MissingTitle { location }
            | Self::InvalidPath { location, .. }
            | Self::CyclicReference { location, .. } => Some(location),
            Self::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location_and_reason() {
        let err = NavError::InvalidPath {
            location: "sidebar[0].children[2]".to_owned(),
            reason: "path is empty".to_owned(),
        };

        let msg = err.to_string();

        assert!(msg.contains("sidebar[0].children[2]"));
        assert!(msg.contains("path is empty"));
    }

    #[test]
    fn test_location_accessor() {
        let err = NavError::MissingTitle {
            location: "sidebar[3]".to_owned(),
        };
        assert_eq!(err.location(), Some("sidebar[3]"));

        let err = NavError::Parse("unexpected end of input".to_owned());
        assert_eq!(err.location(), None);
    }

    #[test]
    fn test_cyclic_reference_mentions_limit() {
        let err = NavError::CyclicReference {
            location: "sidebar[0]".to_owned(),
            limit: 64,
        };
        assert!(err.to_string().contains("64 levels"));
    }
}
