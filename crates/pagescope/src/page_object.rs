//! Page Object Model
//!
//! A page object is a tree of named nodes. Component nodes group children
//! and contribute scope; property nodes additionally declare what to read.
//! The tree is immutable once built. Every read resolves against whatever
//! the [`ContainerSource`] currently holds.
//!
//! ```ignore
//! let page = PageObject::new(
//!     NodeBuilder::new()
//!         .with_scope(".login-form")
//!         .with_child("username", value("input[name=username]"))
//!         .with_child("errors", text(".error").with_multiple(true)),
//! )?;
//!
//! let fixture = TestFixture::with_markup(markup);
//! assert_eq!(page.read("username", &fixture)?, PropertyValue::from("alice"));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use serde::Serialize;

use crate::accessor::{self, Accessor};
use crate::extract::{self, Extractor};
use crate::fixture::ContainerSource;
use crate::multiplicity::Resolved;
use crate::result::{PageError, PageResult};
use crate::scope::{compose, QueryOptions, ResolutionContext, ScopeStep};

/// Name of the root node unless a definition overrides it
pub const DEFAULT_ROOT_NAME: &str = "page";

/// What a property node reads from its element(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// Form control value or contenteditable markup
    Value,
    /// Normalized text content
    Text,
    /// Named attribute
    Attribute(String),
    /// Class list contains the class
    HasClass(String),
    /// Class list does not contain the class
    NotHasClass(String),
    /// Normalized text contains the string
    Contains(String),
    /// Element resolves
    IsPresent,
    /// Number of matches
    Count,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Text => write!(f, "text"),
            Self::Attribute(name) => write!(f, "attribute({name})"),
            Self::HasClass(class) => write!(f, "hasClass({class})"),
            Self::NotHasClass(class) => write!(f, "notHasClass({class})"),
            Self::Contains(text) => write!(f, "contains({text:?})"),
            Self::IsPresent => write!(f, "isPresent"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// Result of reading a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// String result (`value`, `text`, present `attribute`)
    Text(String),
    /// Boolean result (`hasClass`, `contains`, `isPresent`, ...)
    Bool(bool),
    /// Match count
    Count(usize),
    /// Absent attribute
    Missing,
    /// One result per element under `multiple: true`
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// String content, if this is a text result
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean result
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Items, if this is a list result
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Missing => write!(f, "null"),
            Self::List(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<usize> for PropertyValue {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

impl From<Option<String>> for PropertyValue {
    fn from(s: Option<String>) -> Self {
        s.map_or(Self::Missing, Self::Text)
    }
}

impl<T: Into<Self>> From<Resolved<T>> for PropertyValue {
    fn from(resolved: Resolved<T>) -> Self {
        match resolved {
            Resolved::One(item) => item.into(),
            Resolved::Many(items) => Self::List(items.into_iter().map(Into::into).collect()),
        }
    }
}

impl<T: Into<Self>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Builder for one node of a page-object tree
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    selector: Option<String>,
    options: QueryOptions,
    kind: Option<PropertyKind>,
    children: Vec<(String, NodeBuilder)>,
}

impl NodeBuilder {
    /// Create a component node with no selector and no options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a property node
    #[must_use]
    pub fn property(kind: PropertyKind, selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Set the node's own selector
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Remove the node's own selector
    #[must_use]
    pub fn without_selector(mut self) -> Self {
        self.selector = None;
        self
    }

    /// Set what the node reads
    #[must_use]
    pub fn with_kind(mut self, kind: PropertyKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the scope selector
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.options.scope = Some(scope.into());
        self
    }

    /// Set the test container override
    #[must_use]
    pub fn with_test_container(mut self, container: impl Into<String>) -> Self {
        self.options.test_container = Some(container.into());
        self
    }

    /// Discard inherited scope
    #[must_use]
    pub const fn with_reset_scope(mut self, reset: bool) -> Self {
        self.options.reset_scope = reset;
        self
    }

    /// Accept any number of matches
    #[must_use]
    pub const fn with_multiple(mut self, multiple: bool) -> Self {
        self.options.multiple = multiple;
        self
    }

    /// Pick the match at `index`
    #[must_use]
    pub const fn with_at(mut self, index: usize) -> Self {
        self.options.at = Some(index);
        self
    }

    /// Replace all options at once
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a named child node
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: Self) -> Self {
        self.children.push((name.into(), child));
        self
    }

    /// Build a page object rooted at this node
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] for invalid or duplicate child names.
    pub fn build(self) -> PageResult<PageObject> {
        PageObject::new(self)
    }

    fn validate(&self, path: &str) -> PageResult<()> {
        let mut seen = HashSet::new();
        for (name, child) in &self.children {
            if name.is_empty() || name.contains('.') {
                return Err(PageError::definition(format!(
                    "invalid property name '{name}' under '{path}'"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(PageError::definition(format!(
                    "duplicate property '{path}.{name}'"
                )));
            }
            child.validate(&format!("{path}.{name}"))?;
        }
        Ok(())
    }

    fn into_node(self, name: String, parent: Weak<PageNode>) -> Arc<PageNode> {
        Arc::new_cyclic(|me| {
            let children = self
                .children
                .into_iter()
                .map(|(child_name, child)| child.into_node(child_name, me.clone()))
                .collect();
            PageNode {
                name,
                selector: self.selector,
                options: self.options,
                kind: self.kind,
                children,
                parent,
            }
        })
    }
}

/// `value` property
#[must_use]
pub fn value(selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::Value, selector)
}

/// `text` property
#[must_use]
pub fn text(selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::Text, selector)
}

/// `attribute` property
#[must_use]
pub fn attribute(name: impl Into<String>, selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::Attribute(name.into()), selector)
}

/// `hasClass` property
#[must_use]
pub fn has_class(class: impl Into<String>, selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::HasClass(class.into()), selector)
}

/// `notHasClass` property
#[must_use]
pub fn not_has_class(class: impl Into<String>, selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::NotHasClass(class.into()), selector)
}

/// `contains` property
#[must_use]
pub fn contains(text: impl Into<String>, selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::Contains(text.into()), selector)
}

/// `isPresent` property
#[must_use]
pub fn is_present(selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::IsPresent, selector)
}

/// `count` property
#[must_use]
pub fn count(selector: impl Into<String>) -> NodeBuilder {
    NodeBuilder::property(PropertyKind::Count, selector)
}

/// A node of a built page-object tree.
///
/// The parent link is a back-reference only; the root owns the tree.
#[derive(Debug)]
pub struct PageNode {
    name: String,
    selector: Option<String>,
    options: QueryOptions,
    kind: Option<PropertyKind>,
    children: Vec<Arc<PageNode>>,
    parent: Weak<PageNode>,
}

impl PageNode {
    /// Node name (the key it was declared under)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Own selector
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Declared options
    #[must_use]
    pub const fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Property kind, `None` for component nodes
    #[must_use]
    pub const fn kind(&self) -> Option<&PropertyKind> {
        self.kind.as_ref()
    }

    /// Child nodes in declaration order
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().map(|child| &**child)
    }

    /// Child by name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children().find(|c| c.name == name)
    }

    /// Parent node, `None` for the root
    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.upgrade()
    }

    /// Ancestors ordered from the root down to the parent
    #[must_use]
    pub fn ancestors(&self) -> Vec<Arc<Self>> {
        let mut chain = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            chain.push(node);
        }
        chain.reverse();
        chain
    }

    /// Dotted path from the root, e.g. `page.foo.bar`
    #[must_use]
    pub fn path(&self) -> String {
        let mut segments: Vec<String> = self
            .ancestors()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        segments.push(self.name.clone());
        segments.join(".")
    }

    /// Compose this node's selector, container and policy
    #[must_use]
    pub fn resolution_context(&self) -> ResolutionContext {
        let ancestors = self.ancestors();
        let mut steps: Vec<ScopeStep<'_>> = ancestors.iter().map(|n| n.scope_step()).collect();
        steps.push(self.scope_step());
        compose(&steps)
    }

    /// Typed accessor reading this node with `extractor`
    #[must_use]
    pub const fn accessor<E: Extractor>(&self, extractor: E) -> Accessor<'_, E> {
        Accessor::new(self, extractor)
    }

    /// Read the declared property
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotAProperty`] for component nodes, and any
    /// resolution failure annotated with this node's path.
    pub fn read<S>(&self, source: &S) -> PageResult<PropertyValue>
    where
        S: ContainerSource + ?Sized,
    {
        let Some(kind) = &self.kind else {
            return Err(PageError::NotAProperty { path: self.path() });
        };

        let value: PropertyValue = match kind {
            PropertyKind::Value => self.accessor(extract::Value).read(source)?.into(),
            PropertyKind::Text => self.accessor(extract::Text).read(source)?.into(),
            PropertyKind::Attribute(name) => self
                .accessor(extract::Attribute(name.clone()))
                .read(source)?
                .into(),
            PropertyKind::HasClass(class) => self
                .accessor(extract::HasClass(class.clone()))
                .read(source)?
                .into(),
            PropertyKind::NotHasClass(class) => self
                .accessor(extract::HasClass(class.clone()))
                .read(source)?
                .map(|has| !has)
                .into(),
            PropertyKind::Contains(text) => self
                .accessor(extract::Contains(text.clone()))
                .read(source)?
                .into(),
            PropertyKind::IsPresent => accessor::is_present(self, source)?.into(),
            PropertyKind::Count => accessor::count(self, source)?.into(),
        };
        Ok(value)
    }

    fn scope_step(&self) -> ScopeStep<'_> {
        ScopeStep::new(self.selector.as_deref(), &self.options)
    }
}

/// Root handle of a page-object tree.
#[derive(Debug, Clone)]
pub struct PageObject {
    root: Arc<PageNode>,
}

impl PageObject {
    /// Build a page object whose root is named `page`
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] for invalid or duplicate child names.
    pub fn new(root: NodeBuilder) -> PageResult<Self> {
        Self::named(DEFAULT_ROOT_NAME, root)
    }

    /// Build a page object with a custom root name
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Definition`] for an invalid root name or invalid
    /// or duplicate child names.
    pub fn named(name: impl Into<String>, root: NodeBuilder) -> PageResult<Self> {
        let name = name.into();
        if name.is_empty() || name.contains('.') {
            return Err(PageError::definition(format!("invalid page name '{name}'")));
        }
        root.validate(&name)?;
        Ok(Self {
            root: root.into_node(name, Weak::new()),
        })
    }

    /// Root node
    #[must_use]
    pub fn root(&self) -> &PageNode {
        &self.root
    }

    /// Root name
    #[must_use]
    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// Node at a dotted path relative to the root.
    ///
    /// The root name may be given as the first segment (`page.foo`); an
    /// empty path is the root itself.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownProperty`] if any segment is undeclared.
    pub fn node(&self, path: &str) -> PageResult<&PageNode> {
        let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        if segments.first() == Some(&self.root.name()) && self.root.child(self.root.name()).is_none()
        {
            segments.remove(0);
        }

        let mut node: &PageNode = &self.root;
        for segment in &segments {
            node = node
                .child(segment)
                .ok_or_else(|| PageError::UnknownProperty {
                    path: format!("{}.{}", self.root.name(), segments.join(".")),
                })?;
        }
        Ok(node)
    }

    /// Read the property at a dotted path
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownProperty`] for undeclared paths and any
    /// failure from [`PageNode::read`].
    pub fn read<S>(&self, path: &str, source: &S) -> PageResult<PropertyValue>
    where
        S: ContainerSource + ?Sized,
    {
        self.node(path)?.read(source)
    }

    /// Dotted paths (without the root name) of every property node, depth first
    #[must_use]
    pub fn property_paths(&self) -> Vec<String> {
        fn walk(node: &PageNode, prefix: &str, out: &mut Vec<String>) {
            for child in node.children() {
                let path = if prefix.is_empty() {
                    child.name().to_string()
                } else {
                    format!("{prefix}.{}", child.name())
                };
                if child.kind().is_some() {
                    out.push(path.clone());
                }
                walk(child, &path, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.root, "", &mut out);
        out
    }
}
