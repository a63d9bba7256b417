//! Pagescope: declarative page objects for HTML component tests
//!
//! Describe a page's structure once (selectors, scope, nesting,
//! multiplicity) and read it through named properties instead of repeating
//! DOM queries in every test.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      PAGESCOPE read path                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  PageNode ──► scope::compose ──► fixture::locate ──► dom::query   │
//! │                                                        │         │
//! │  PropertyValue ◄── Extractor ◄── multiplicity::resolve ◄┘         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read re-resolves against the current render; nothing is cached.
//!
//! ```ignore
//! use pagescope::prelude::*;
//!
//! let page = NodeBuilder::new()
//!     .with_scope(".scope")
//!     .with_child("foo", value("input"))
//!     .build()?;
//!
//! let fixture = TestFixture::with_markup(r#"<div class="scope"><input value="ipsum"></div>"#);
//! assert_eq!(page.read("foo", &fixture)?, PropertyValue::from("ipsum"));
//! ```

#![warn(missing_docs)]

pub mod accessor;
pub mod definition;
pub mod dom;
pub mod extract;
pub mod fixture;
pub mod multiplicity;
pub mod page_object;
mod result;
pub mod scope;

pub use accessor::Accessor;
pub use definition::{NodeDefinition, PageDefinition, PropertyName};
pub use dom::MatchSet;
pub use extract::Extractor;
pub use fixture::{
    ContainerSource, MountOptions, TestFixture, ALTERNATE_CONTAINER, DEFAULT_CONTAINER,
};
pub use multiplicity::{MultiplicityError, Policy, Resolved};
pub use page_object::{
    attribute, contains, count, has_class, is_present, not_has_class, text, value, NodeBuilder,
    PageNode, PageObject, PropertyKind, PropertyValue, DEFAULT_ROOT_NAME,
};
pub use result::{PageError, PageResult};
pub use scope::{QueryOptions, ResolutionContext};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::extract::{Attribute, Contains, HasClass, Text, Value};
    pub use super::{
        attribute, contains, count, has_class, is_present, not_has_class, text, value, Accessor,
        ContainerSource, Extractor, MountOptions, NodeBuilder, PageError, PageNode, PageObject,
        PageResult, Policy, PropertyKind, PropertyValue, QueryOptions, Resolved, TestFixture,
        ALTERNATE_CONTAINER, DEFAULT_CONTAINER,
    };
}
