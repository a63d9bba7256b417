//! Multiplicity policy: how many matches are acceptable and how the result
//! is shaped.
//!
//! Every property kind goes through [`resolve`], so the rules here are the
//! same for values, text, attributes and presence checks:
//!
//! - [`Policy::Single`]: exactly one match, returned unwrapped
//! - [`Policy::Index`]: the match at the index, returned unwrapped
//! - [`Policy::All`]: every match in document order, any count

use serde::Serialize;
use thiserror::Error;

use crate::result::PageError;

/// Multiplicity policy of a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// Exactly one match required
    #[default]
    Single,
    /// Match at the given index (0-based, document order)
    Index(usize),
    /// Any number of matches, including zero
    All,
}

/// Result shaped by a policy: one item, or an ordered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved<T> {
    /// Produced by [`Policy::Single`] and [`Policy::Index`]
    One(T),
    /// Produced by [`Policy::All`]
    Many(Vec<T>),
}

impl<T> Resolved<T> {
    /// Apply `f` to every item, keeping the shape
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Resolved<U> {
        match self {
            Self::One(item) => Resolved::One(f(item)),
            Self::Many(items) => Resolved::Many(items.into_iter().map(f).collect()),
        }
    }

    /// The single item, if this is not a sequence
    pub fn into_one(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(_) => None,
        }
    }

    /// All items in order; a single item becomes a one-element vector
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// Whether this came from [`Policy::All`]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

/// Disagreement between a policy and the actual match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MultiplicityError {
    /// Nothing matched under [`Policy::Single`]
    #[error("element not found")]
    NotFound,
    /// More than one element matched under [`Policy::Single`]
    #[error("matched {count} elements")]
    Ambiguous {
        /// Number of matches
        count: usize,
    },
    /// Index beyond the number of matches
    #[error("index {index} out of range for {count} matches")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of matches
        count: usize,
    },
}

impl MultiplicityError {
    /// Attach the property path and composed selector
    #[must_use]
    pub fn at_path(self, path: impl Into<String>, selector: impl Into<String>) -> PageError {
        let path = path.into();
        let selector = selector.into();
        match self {
            Self::NotFound => PageError::NotFound { path, selector },
            Self::Ambiguous { count } => PageError::AmbiguousMatch {
                path,
                selector,
                count,
            },
            Self::OutOfRange { index, count } => PageError::IndexOutOfRange {
                path,
                selector,
                index,
                count,
            },
        }
    }
}

/// Apply `policy` to an ordered match list.
///
/// # Errors
///
/// Returns a [`MultiplicityError`] when the count does not satisfy the policy.
pub fn resolve<T>(mut matches: Vec<T>, policy: Policy) -> Result<Resolved<T>, MultiplicityError> {
    let count = matches.len();
    match policy {
        Policy::All => Ok(Resolved::Many(matches)),
        Policy::Index(index) if index < count => Ok(Resolved::One(matches.swap_remove(index))),
        Policy::Index(index) => Err(MultiplicityError::OutOfRange { index, count }),
        Policy::Single => match count {
            0 => Err(MultiplicityError::NotFound),
            1 => Ok(Resolved::One(matches.swap_remove(0))),
            _ => Err(MultiplicityError::Ambiguous { count }),
        },
    }
}
