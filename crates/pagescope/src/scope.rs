//! Scope composition along a page-object node chain.
//!
//! Each node contributes its `scope` and then its own `selector` to the
//! composed selector, root first. A node declaring `reset_scope` discards
//! everything contributed above it. Test container overrides are inherited
//! from the nearest declaring node regardless of `reset_scope`.
//!
//! Parts are joined as plain text with a single space. A selector list in a
//! scope is not grouped, so `.a, .b` over `input` composes to `.a, .b input`
//! and only the last alternative is scoped.

use crate::multiplicity::Policy;

/// Options recognized on every page-object node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Selector prefix applied to this node and its descendants
    pub scope: Option<String>,
    /// Container to search instead of the default test container
    pub test_container: Option<String>,
    /// Discard scope inherited from ancestors
    pub reset_scope: bool,
    /// Accept any number of matches and return all of them
    pub multiple: bool,
    /// Pick the match at this index (document order)
    pub at: Option<usize>,
}

impl QueryOptions {
    /// Multiplicity policy declared by these options.
    ///
    /// `at` takes precedence over `multiple`.
    #[must_use]
    pub fn policy(&self) -> Policy {
        match (self.at, self.multiple) {
            (Some(index), _) => Policy::Index(index),
            (None, true) => Policy::All,
            (None, false) => Policy::Single,
        }
    }
}

/// One node's contribution to a resolution, as seen by the composer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeStep<'a> {
    /// Node's own selector
    pub selector: Option<&'a str>,
    /// Node's declared options
    pub options: Option<&'a QueryOptions>,
}

impl<'a> ScopeStep<'a> {
    /// Step for a node with a selector and options
    #[must_use]
    pub const fn new(selector: Option<&'a str>, options: &'a QueryOptions) -> Self {
        Self {
            selector,
            options: Some(options),
        }
    }

    fn scope(&self) -> Option<&'a str> {
        self.options.and_then(|o| o.scope.as_deref())
    }

    fn test_container(&self) -> Option<&'a str> {
        self.options.and_then(|o| o.test_container.as_deref())
    }

    fn resets(&self) -> bool {
        self.options.is_some_and(|o| o.reset_scope)
    }
}

/// Everything a single read needs, computed fresh per access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Composed selector; `None` when nothing was declared at any level
    pub selector: Option<String>,
    /// Test container override, if any node in the chain declares one
    pub container: Option<String>,
    /// Multiplicity policy of the accessed node
    pub policy: Policy,
}

impl ResolutionContext {
    /// Selector text for error messages
    #[must_use]
    pub fn selector_text(&self) -> &str {
        self.selector.as_deref().unwrap_or("")
    }
}

/// Compose the effective selector and container for a chain of steps
/// ordered root to leaf. The leaf's options decide the policy.
#[must_use]
pub fn compose(chain: &[ScopeStep<'_>]) -> ResolutionContext {
    let mut parts: Vec<&str> = Vec::new();

    for step in chain.iter().rev() {
        if let Some(selector) = step.selector.filter(|s| !s.trim().is_empty()) {
            parts.push(selector.trim());
        }
        if let Some(scope) = step.scope().filter(|s| !s.trim().is_empty()) {
            parts.push(scope.trim());
        }
        if step.resets() {
            break;
        }
    }
    parts.reverse();

    let container = chain
        .iter()
        .rev()
        .find_map(ScopeStep::test_container)
        .map(str::to_string);

    let policy = chain
        .last()
        .and_then(|step| step.options)
        .map(QueryOptions::policy)
        .unwrap_or_default();

    ResolutionContext {
        selector: (!parts.is_empty()).then(|| parts.join(" ")),
        container,
        policy,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn scoped(scope: &str) -> QueryOptions {
        QueryOptions {
            scope: Some(scope.to_string()),
            ..QueryOptions::default()
        }
    }

    mod compose_tests {
        use super::*;

        #[test]
        fn test_single_selector() {
            let leaf = QueryOptions::default();
            let ctx = compose(&[ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some("input"));
            assert_eq!(ctx.container, None);
            assert_eq!(ctx.policy, Policy::Single);
        }

        #[test]
        fn test_selector_list_scope_is_not_grouped() {
            let leaf = scoped(".a, .b");
            let ctx = compose(&[ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some(".a, .b input"));

            let html = scraper::Html::parse_fragment(
                r#"<div class="a"><input></div><div class="b"><input></div>"#,
            );
            let set = crate::dom::query(ctx.selector_text(), html.root_element()).unwrap();
            let names: Vec<&str> = set.iter().map(|el| el.value().name()).collect();
            assert_eq!(names, vec!["div", "input"]);
        }

        #[test]
        fn test_own_scope_precedes_selector() {
            let leaf = scoped(".scope");
            let ctx = compose(&[ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some(".scope input"));
        }

        #[test]
        fn test_ancestor_scopes_root_to_leaf() {
            let root = scoped(".page");
            let mid = QueryOptions::default();
            let comp = scoped(".comp");
            let leaf = QueryOptions::default();
            let ctx = compose(&[
                ScopeStep::new(None, &root),
                ScopeStep::new(None, &mid),
                ScopeStep::new(Some("form"), &comp),
                ScopeStep::new(Some("input"), &leaf),
            ]);
            assert_eq!(ctx.selector.as_deref(), Some(".page .comp form input"));
        }

        #[test]
        fn test_reset_scope_on_leaf() {
            let root = scoped(".scope");
            let leaf = QueryOptions {
                reset_scope: true,
                at: Some(0),
                ..QueryOptions::default()
            };
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some("input"));
            assert_eq!(ctx.policy, Policy::Index(0));
        }

        #[test]
        fn test_reset_scope_keeps_own_scope() {
            let root = scoped(".page");
            let leaf = QueryOptions {
                scope: Some(".own".to_string()),
                reset_scope: true,
                ..QueryOptions::default()
            };
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some(".own input"));
        }

        #[test]
        fn test_reset_scope_on_intermediate_node() {
            let root = scoped(".page");
            let comp = QueryOptions {
                scope: Some(".modal".to_string()),
                reset_scope: true,
                ..QueryOptions::default()
            };
            let leaf = QueryOptions::default();
            let ctx = compose(&[
                ScopeStep::new(None, &root),
                ScopeStep::new(None, &comp),
                ScopeStep::new(Some("button"), &leaf),
            ]);
            assert_eq!(ctx.selector.as_deref(), Some(".modal button"));
        }

        #[test]
        fn test_nothing_declared() {
            let root = QueryOptions::default();
            let leaf = QueryOptions::default();
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(None, &leaf)]);
            assert_eq!(ctx.selector, None);
            assert_eq!(ctx.selector_text(), "");
        }

        #[test]
        fn test_blank_parts_ignored() {
            let root = scoped("  ");
            let leaf = QueryOptions::default();
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(Some(" span "), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some("span"));
        }

        #[test]
        fn test_empty_chain() {
            let ctx = compose(&[]);
            assert_eq!(ctx.selector, None);
            assert_eq!(ctx.policy, Policy::Single);
        }
    }

    mod container_tests {
        use super::*;

        #[test]
        fn test_inherited_from_ancestor() {
            let root = QueryOptions {
                test_container: Some("#alt".to_string()),
                ..QueryOptions::default()
            };
            let leaf = QueryOptions::default();
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.container.as_deref(), Some("#alt"));
        }

        #[test]
        fn test_descendant_takes_precedence() {
            let root = QueryOptions {
                test_container: Some("#outer".to_string()),
                ..QueryOptions::default()
            };
            let leaf = QueryOptions {
                test_container: Some("#inner".to_string()),
                ..QueryOptions::default()
            };
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.container.as_deref(), Some("#inner"));
        }

        #[test]
        fn test_survives_reset_scope() {
            let root = QueryOptions {
                scope: Some(".scope".to_string()),
                test_container: Some("#alt".to_string()),
                ..QueryOptions::default()
            };
            let leaf = QueryOptions {
                reset_scope: true,
                ..QueryOptions::default()
            };
            let ctx = compose(&[ScopeStep::new(None, &root), ScopeStep::new(Some("input"), &leaf)]);
            assert_eq!(ctx.selector.as_deref(), Some("input"));
            assert_eq!(ctx.container.as_deref(), Some("#alt"));
        }
    }

    mod policy_tests {
        use super::*;

        #[test]
        fn test_at_wins_over_multiple() {
            let options = QueryOptions {
                multiple: true,
                at: Some(2),
                ..QueryOptions::default()
            };
            assert_eq!(options.policy(), Policy::Index(2));
        }

        #[test]
        fn test_multiple() {
            let options = QueryOptions {
                multiple: true,
                ..QueryOptions::default()
            };
            assert_eq!(options.policy(), Policy::All);
        }
    }
}
