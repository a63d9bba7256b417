//! Rendered roots that page objects are read against.
//!
//! The engine never reaches for ambient DOM state: every read is handed a
//! [`ContainerSource`] and resolves its container through [`locate`].
//! [`TestFixture`] is the in-process render target used by tests; any parsed
//! [`Html`] document is a source as well, rooted at its `<html>` element.

use std::fmt;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::dom::parse_selector;
use crate::result::{PageError, PageResult};

/// Selector of the default test container
pub const DEFAULT_CONTAINER: &str = "#pagescope-testing";

/// Selector of the alternate test container
pub const ALTERNATE_CONTAINER: &str = "#alternate-pagescope-testing";

/// A rendered document plus its default container.
pub trait ContainerSource {
    /// The whole rendered document
    fn document(&self) -> &Html;

    /// Root searched when no test container override applies
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ContainerNotFound`] if the default root is missing.
    fn default_container(&self) -> PageResult<ElementRef<'_>>;
}

impl ContainerSource for Html {
    fn document(&self) -> &Html {
        self
    }

    fn default_container(&self) -> PageResult<ElementRef<'_>> {
        Ok(self.root_element())
    }
}

/// Locate the root a property searches within.
///
/// An override is looked up anywhere in the document and the first match
/// wins; without one the source's default container is used.
///
/// # Errors
///
/// Returns [`PageError::ContainerNotFound`] when the override matches
/// nothing, or [`PageError::InvalidSelector`] when it does not parse. Both
/// carry an empty path for the caller to fill in.
pub fn locate<'a, S>(source: &'a S, container: Option<&str>) -> PageResult<ElementRef<'a>>
where
    S: ContainerSource + ?Sized,
{
    let Some(container) = container else {
        return source.default_container();
    };

    let selector = parse_selector(container)?;
    source
        .document()
        .select(&selector)
        .next()
        .ok_or_else(|| PageError::ContainerNotFound {
            path: String::new(),
            container: container.to_string(),
        })
}

/// Options for [`TestFixture::mount`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountOptions {
    /// Render into the alternate container instead of the default one
    pub use_alternate_container: bool,
}

impl MountOptions {
    /// Options rendering into the alternate container
    #[must_use]
    pub const fn alternate() -> Self {
        Self {
            use_alternate_container: true,
        }
    }
}

/// In-process render target with a default and an alternate container.
///
/// Mounting replaces the whole document, so reads always observe the most
/// recent render.
pub struct TestFixture {
    document: Html,
    markup: String,
    options: MountOptions,
}

impl fmt::Debug for TestFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFixture")
            .field("markup", &self.markup)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a fixture with both containers empty
    #[must_use]
    pub fn new() -> Self {
        let options = MountOptions::default();
        Self {
            document: Html::parse_document(&render("", options)),
            markup: String::new(),
            options,
        }
    }

    /// Create a fixture and mount `markup` into the default container
    #[must_use]
    pub fn with_markup(markup: &str) -> Self {
        let mut fixture = Self::new();
        fixture.mount(markup, MountOptions::default());
        fixture
    }

    /// Render `markup` into the container selected by `options`
    pub fn mount(&mut self, markup: &str, options: MountOptions) {
        debug!(
            alternate = options.use_alternate_container,
            bytes = markup.len(),
            "mounting fixture"
        );
        self.document = Html::parse_document(&render(markup, options));
        self.markup = markup.to_string();
        self.options = options;
    }

    /// Empty both containers
    pub fn clear(&mut self) {
        self.mount("", MountOptions::default());
    }

    /// Markup of the most recent mount
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Options of the most recent mount
    #[must_use]
    pub const fn options(&self) -> MountOptions {
        self.options
    }

    /// Serialized HTML of the whole rendered document
    #[must_use]
    pub fn html(&self) -> String {
        self.document.html()
    }
}

impl ContainerSource for TestFixture {
    fn document(&self) -> &Html {
        &self.document
    }

    fn default_container(&self) -> PageResult<ElementRef<'_>> {
        locate(self, Some(DEFAULT_CONTAINER))
    }
}

fn render(markup: &str, options: MountOptions) -> String {
    let (default, alternate) = if options.use_alternate_container {
        ("", markup)
    } else {
        (markup, "")
    };
    format!(
        "<!DOCTYPE html><html><head></head><body>\
         <div id=\"pagescope-testing-container\"><div id=\"pagescope-testing\">{default}</div></div>\
         <div id=\"alternate-pagescope-testing\">{alternate}</div>\
         </body></html>"
    )
}
