//! Result and error types for Pagescope.

use thiserror::Error;

/// Result type for Pagescope operations
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur while defining or reading page objects.
///
/// Resolution failures carry the dotted path of the property that failed
/// (`page.foo.bar`) so a failure deep inside nested components can be traced
/// without a backtrace.
#[derive(Debug, Error)]
pub enum PageError {
    /// No element matched under the default single-element policy
    #[error("Element not found. PageObject: '{path}' Selector: '{selector}'")]
    NotFound {
        /// Dotted property path
        path: String,
        /// Composed selector that was queried
        selector: String,
    },

    /// More than one element matched under the default single-element policy
    #[error(
        "'{selector}' matched more than one element. If this is not an error use {{ multiple: true }}. Matched {count}. PageObject: '{path}'"
    )]
    AmbiguousMatch {
        /// Dotted property path
        path: String,
        /// Composed selector that was queried
        selector: String,
        /// Number of elements matched
        count: usize,
    },

    /// The `at` index is beyond the number of matched elements
    #[error(
        "Element at index {index} not found ({count} matched). PageObject: '{path}' Selector: '{selector}'"
    )]
    IndexOutOfRange {
        /// Dotted property path
        path: String,
        /// Composed selector that was queried
        selector: String,
        /// Requested index
        index: usize,
        /// Number of elements matched
        count: usize,
    },

    /// The named test container is not present in the current render
    #[error("Test container '{container}' not found. PageObject: '{path}'")]
    ContainerNotFound {
        /// Dotted property path
        path: String,
        /// Container selector that was searched for
        container: String,
    },

    /// A selector could not be parsed
    #[error("Invalid selector '{selector}': {message}. PageObject: '{path}'")]
    InvalidSelector {
        /// Dotted property path, empty outside a property read
        path: String,
        /// Selector text
        selector: String,
        /// Parser message
        message: String,
    },

    /// No node is declared at the given path
    #[error("Unknown property '{path}'")]
    UnknownProperty {
        /// Dotted path that was requested
        path: String,
    },

    /// The node at the given path groups children but declares no property
    #[error("'{path}' is a component, not a readable property")]
    NotAProperty {
        /// Dotted path of the component node
        path: String,
    },

    /// Page definition is malformed
    #[error("Page definition error: {message}")]
    Definition {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PageError {
    /// Create a definition error
    #[must_use]
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            message: message.into(),
        }
    }

    /// Dotted property path the error is attached to, if any
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound { path, .. }
            | Self::AmbiguousMatch { path, .. }
            | Self::IndexOutOfRange { path, .. }
            | Self::ContainerNotFound { path, .. }
            | Self::InvalidSelector { path, .. }
            | Self::UnknownProperty { path }
            | Self::NotAProperty { path } => Some(path.as_str()).filter(|p| !p.is_empty()),
            _ => None,
        }
    }

    /// Attach a property path to a failure raised below the accessor.
    ///
    /// Only errors whose path is still empty are rewritten.
    #[must_use]
    pub fn at_path(self, node_path: &str) -> Self {
        match self {
            Self::ContainerNotFound { path, container } if path.is_empty() => {
                Self::ContainerNotFound {
                    path: node_path.to_string(),
                    container,
                }
            }
            Self::InvalidSelector {
                path,
                selector,
                message,
            } if path.is_empty() => Self::InvalidSelector {
                path: node_path.to_string(),
                selector,
                message,
            },
            other => other,
        }
    }
}
