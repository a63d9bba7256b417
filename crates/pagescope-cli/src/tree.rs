//! Page Tree Visualization
//!
//! Displays the node tree of a page definition with selectors and options.
//!
//! ## Example Output
//!
//! ```text
//! page scope=".login-form"
//! ├── form scope="form"
//! │   ├── password [value] "input[type=password]"
//! │   └── username [value] "input[name=username]"
//! └── remember [hasClass(is-checked)] ".remember" container="#alternate-pagescope-testing"
//!
//! Total: 5 nodes, 3 properties
//! ```

use console::style;
use pagescope::{PageNode, PageObject};

/// Render the full tree with a summary line
#[must_use]
pub fn render_tree(page: &PageObject, use_color: bool) -> String {
    let mut output = String::new();

    output.push_str(&describe(page.root(), use_color));
    output.push('\n');
    render_children(page.root(), use_color, "", &mut output);

    let (nodes, properties) = tally(page.root());
    output.push('\n');
    output.push_str(&format!("Total: {nodes} nodes, {properties} properties\n"));

    output
}

fn render_children(node: &PageNode, use_color: bool, prefix: &str, output: &mut String) {
    let children: Vec<&PageNode> = node.children().collect();
    let len = children.len();

    for (i, child) in children.into_iter().enumerate() {
        let is_last = i + 1 == len;
        let connector = if is_last { "└── " } else { "├── " };
        let child_prefix = if is_last { "    " } else { "│   " };

        output.push_str(prefix);
        output.push_str(connector);
        output.push_str(&describe(child, use_color));
        output.push('\n');

        render_children(child, use_color, &format!("{prefix}{child_prefix}"), output);
    }
}

/// One line for a node: name, kind, selector, then non-default options
#[must_use]
pub fn describe(node: &PageNode, use_color: bool) -> String {
    let mut line = if use_color {
        style(node.name()).bold().to_string()
    } else {
        node.name().to_string()
    };

    if let Some(kind) = node.kind() {
        let kind = format!("[{kind}]");
        line.push(' ');
        line.push_str(&if use_color {
            style(kind).green().to_string()
        } else {
            kind
        });
    }
    if let Some(selector) = node.selector() {
        line.push_str(&format!(" {selector:?}"));
    }

    let options = node.options();
    if let Some(ref scope) = options.scope {
        line.push_str(&format!(" scope={scope:?}"));
    }
    if let Some(ref container) = options.test_container {
        line.push_str(&format!(" container={container:?}"));
    }
    if options.reset_scope {
        line.push_str(" resetScope");
    }
    if options.multiple {
        line.push_str(" multiple");
    }
    if let Some(at) = options.at {
        line.push_str(&format!(" at={at}"));
    }

    line
}

/// (nodes, properties), root included in nodes
fn tally(node: &PageNode) -> (usize, usize) {
    let own = usize::from(node.kind().is_some());
    node.children()
        .map(tally)
        .fold((1, own), |(nodes, properties), (n, p)| (nodes + n, properties + p))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pagescope::prelude::*;

    fn login_page() -> PageObject {
        NodeBuilder::new()
            .with_scope(".login-form")
            .with_child(
                "form",
                NodeBuilder::new()
                    .with_scope("form")
                    .with_child("password", value("input[type=password]"))
                    .with_child("username", value("input[name=username]")),
            )
            .with_child(
                "remember",
                has_class("is-checked", ".remember").with_test_container(ALTERNATE_CONTAINER),
            )
            .build()
            .unwrap()
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_renders_connectors() {
            let out = render_tree(&login_page(), false);
            let lines: Vec<&str> = out.lines().collect();
            assert_eq!(lines[0], r#"page scope=".login-form""#);
            assert_eq!(lines[1], r#"├── form scope="form""#);
            assert_eq!(lines[2], r#"│   ├── password [value] "input[type=password]""#);
            assert_eq!(lines[3], r#"│   └── username [value] "input[name=username]""#);
            assert!(lines[4].starts_with(r#"└── remember [hasClass(is-checked)] ".remember""#));
            assert!(lines[4].contains("container=\"#alternate-pagescope-testing\""));
        }

        #[test]
        fn test_summary_counts() {
            let out = render_tree(&login_page(), false);
            assert!(out.ends_with("Total: 5 nodes, 3 properties\n"));
        }

        #[test]
        fn test_empty_page() {
            let page = NodeBuilder::new().build().unwrap();
            assert_eq!(render_tree(&page, false), "page\n\nTotal: 1 nodes, 0 properties\n");
        }
    }

    mod describe_tests {
        use super::*;

        #[test]
        fn test_multiplicity_flags() {
            let page = NodeBuilder::new()
                .with_child("items", text("li").with_multiple(true))
                .with_child("second", text("li").with_at(1).with_reset_scope(true))
                .build()
                .unwrap();
            assert_eq!(
                describe(page.node("items").unwrap(), false),
                r#"items [text] "li" multiple"#
            );
            assert_eq!(
                describe(page.node("second").unwrap(), false),
                r#"second [text] "li" resetScope at=1"#
            );
        }

        #[test]
        fn test_colored_keeps_name() {
            let page = login_page();
            let line = describe(page.node("form.username").unwrap(), true);
            assert!(line.contains("username"));
            assert!(line.contains("input[name=username]"));
        }
    }
}
