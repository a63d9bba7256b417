//! Property accessors: the read path shared by every property kind.
//!
//! A read composes the node's scope, locates its container, queries the
//! container and applies the multiplicity policy before handing elements to
//! an [`Extractor`]. Nothing is cached between reads.

use scraper::ElementRef;
use tracing::debug;

use crate::dom::{self, MatchSet};
use crate::extract::Extractor;
use crate::fixture::{locate, ContainerSource};
use crate::multiplicity::{self, MultiplicityError, Policy, Resolved};
use crate::page_object::PageNode;
use crate::result::PageResult;
use crate::scope::ResolutionContext;

/// Read-only accessor binding a node to an extractor.
#[derive(Debug, Clone)]
pub struct Accessor<'p, E> {
    node: &'p PageNode,
    extractor: E,
}

impl<'p, E: Extractor> Accessor<'p, E> {
    /// Bind `extractor` to `node`
    #[must_use]
    pub const fn new(node: &'p PageNode, extractor: E) -> Self {
        Self { node, extractor }
    }

    /// Node this accessor reads
    #[must_use]
    pub const fn node(&self) -> &'p PageNode {
        self.node
    }

    /// Resolve the node and extract from every resolved element.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures annotated with the node's path.
    pub fn read<S>(&self, source: &S) -> PageResult<Resolved<E::Output>>
    where
        S: ContainerSource + ?Sized,
    {
        let elements = resolve_elements(self.node, source)?;
        Ok(elements.map(|element| self.extractor.extract(element)))
    }
}

/// Compose, locate and query without applying the multiplicity policy.
///
/// # Errors
///
/// Returns container or selector failures annotated with the node's path.
pub fn match_set<'d, S>(
    node: &PageNode,
    source: &'d S,
) -> PageResult<(ResolutionContext, MatchSet<'d>)>
where
    S: ContainerSource + ?Sized,
{
    let ctx = node.resolution_context();
    let root = locate(source, ctx.container.as_deref()).map_err(|e| e.at_path(&node.path()))?;
    let set = dom::resolve(ctx.selector.as_deref(), root).map_err(|e| e.at_path(&node.path()))?;

    debug!(
        path = %node.path(),
        selector = ctx.selector_text(),
        container = ctx.container.as_deref().unwrap_or("default"),
        matches = set.len(),
        "resolved property"
    );

    Ok((ctx, set))
}

/// Resolve a node to its element or elements under its multiplicity policy.
///
/// # Errors
///
/// Returns [`NotFound`](crate::PageError::NotFound),
/// [`AmbiguousMatch`](crate::PageError::AmbiguousMatch) or
/// [`IndexOutOfRange`](crate::PageError::IndexOutOfRange) when the policy
/// disagrees with the match count, and container or selector failures from
/// resolution.
pub fn resolve_elements<'d, S>(
    node: &PageNode,
    source: &'d S,
) -> PageResult<Resolved<ElementRef<'d>>>
where
    S: ContainerSource + ?Sized,
{
    let (ctx, set) = match_set(node, source)?;
    multiplicity::resolve(set.into_vec(), ctx.policy)
        .map_err(|e| e.at_path(node.path(), ctx.selector_text()))
}

/// Whether the node resolves to an element.
///
/// Always a single boolean. Zero matches, or an index past the end, is
/// `false`. Under `multiple` any match at all is `true`. More than one
/// match under the single-element policy still fails.
///
/// # Errors
///
/// Returns [`AmbiguousMatch`](crate::PageError::AmbiguousMatch) and
/// container or selector failures.
pub fn is_present<S>(node: &PageNode, source: &S) -> PageResult<bool>
where
    S: ContainerSource + ?Sized,
{
    let (ctx, set) = match_set(node, source)?;
    if ctx.policy == Policy::All {
        return Ok(!set.is_empty());
    }
    match multiplicity::resolve(set.into_vec(), ctx.policy) {
        Ok(_) => Ok(true),
        Err(MultiplicityError::NotFound | MultiplicityError::OutOfRange { .. }) => Ok(false),
        Err(e) => Err(e.at_path(node.path(), ctx.selector_text())),
    }
}

/// Number of elements the node's composed selector matches.
///
/// # Errors
///
/// Returns container or selector failures.
pub fn count<S>(node: &PageNode, source: &S) -> PageResult<usize>
where
    S: ContainerSource + ?Sized,
{
    let (_, set) = match_set(node, source)?;
    Ok(set.len())
}
