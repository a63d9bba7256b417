//! Selector resolution against a parsed HTML document.
//!
//! A query never mutates the document and always returns elements in
//! document order. The container root itself is never part of a query
//! result; it is only returned when nothing was declared to query at all.

use scraper::{ElementRef, Selector};
use tracing::trace;

use crate::result::{PageError, PageResult};

/// Ordered set of elements matched by one query.
#[derive(Debug, Clone, Default)]
pub struct MatchSet<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> MatchSet<'a> {
    /// Wrap an already ordered list of elements
    #[must_use]
    pub fn new(elements: Vec<ElementRef<'a>>) -> Self {
        Self { elements }
    }

    /// Match set holding only the container root
    #[must_use]
    pub fn root(root: ElementRef<'a>) -> Self {
        Self {
            elements: vec![root],
        }
    }

    /// Number of matched elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index` in document order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ElementRef<'a>> {
        self.elements.get(index).copied()
    }

    /// Iterate in document order
    pub fn iter(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.elements.iter().copied()
    }

    /// Take the underlying elements
    #[must_use]
    pub fn into_vec(self) -> Vec<ElementRef<'a>> {
        self.elements
    }
}

/// Parse a CSS selector.
///
/// # Errors
///
/// Returns [`PageError::InvalidSelector`] if the selector does not parse.
pub fn parse_selector(selector: &str) -> PageResult<Selector> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        path: String::new(),
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// All descendants of `root` matching `selector`, in document order.
///
/// # Errors
///
/// Returns [`PageError::InvalidSelector`] if the selector does not parse.
pub fn query<'a>(selector: &str, root: ElementRef<'a>) -> PageResult<MatchSet<'a>> {
    let parsed = parse_selector(selector)?;
    let elements: Vec<ElementRef<'a>> = root.select(&parsed).collect();
    trace!(selector, matches = elements.len(), "selector query");
    Ok(MatchSet::new(elements))
}

/// Resolve a composed selector inside a container.
///
/// `None` means no selector was declared anywhere along the node chain, in
/// which case the container root itself is the only match.
///
/// # Errors
///
/// Returns [`PageError::InvalidSelector`] if the selector does not parse.
pub fn resolve<'a>(selector: Option<&str>, root: ElementRef<'a>) -> PageResult<MatchSet<'a>> {
    match selector {
        Some(selector) => query(selector, root),
        None => Ok(MatchSet::root(root)),
    }
}
