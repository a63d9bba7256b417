//! Extractors: what a property reads from each resolved element.

use scraper::ElementRef;

/// Reads a result from one resolved element.
///
/// When a property resolves to several elements the extractor runs once per
/// element, in document order. Any `Fn(ElementRef) -> T` closure is an
/// extractor too.
pub trait Extractor {
    /// Result for one element
    type Output;

    /// Extract from a single element
    fn extract(&self, element: ElementRef<'_>) -> Self::Output;
}

impl<F, T> Extractor for F
where
    F: Fn(ElementRef<'_>) -> T,
{
    type Output = T;

    fn extract(&self, element: ElementRef<'_>) -> T {
        self(element)
    }
}

/// Current value of a form control, or markup of a contenteditable element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Value;

impl Extractor for Value {
    type Output = String;

    fn extract(&self, element: ElementRef<'_>) -> String {
        element_value(element)
    }
}

/// Text content with whitespace collapsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Text;

impl Extractor for Text {
    type Output = String;

    fn extract(&self, element: ElementRef<'_>) -> String {
        normalized_text(element)
    }
}

/// Value of a named attribute, `None` when absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute(pub String);

impl Extractor for Attribute {
    type Output = Option<String>;

    fn extract(&self, element: ElementRef<'_>) -> Option<String> {
        element.value().attr(&self.0).map(str::to_string)
    }
}

/// Whether the element's class list contains a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasClass(pub String);

impl Extractor for HasClass {
    type Output = bool;

    fn extract(&self, element: ElementRef<'_>) -> bool {
        element.value().classes().any(|class| class == self.0)
    }
}

/// Whether the element's normalized text contains a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contains(pub String);

impl Extractor for Contains {
    type Output = bool;

    fn extract(&self, element: ElementRef<'_>) -> bool {
        normalized_text(element).contains(&self.0)
    }
}

/// Value of an element.
///
/// Form controls report their value (an absent `value` attribute on an
/// `<input>` is the empty string). Elements without a value that are
/// contenteditable report their inner markup. Anything else is `""`.
#[must_use]
pub fn element_value(element: ElementRef<'_>) -> String {
    let el = element.value();
    match el.name() {
        "input" => el.attr("value").unwrap_or_default().to_string(),
        "textarea" => el
            .attr("value")
            .map_or_else(|| element.text().collect(), str::to_string),
        "select" => select_value(element),
        _ => {
            if let Some(value) = el.attr("value") {
                value.to_string()
            } else if is_content_editable(element) {
                element.inner_html()
            } else {
                String::new()
            }
        }
    }
}

/// Whether the element carries an enabling `contenteditable` attribute
#[must_use]
pub fn is_content_editable(element: ElementRef<'_>) -> bool {
    element
        .value()
        .attr("contenteditable")
        .is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"))
}

/// Text content, trimmed, with runs of whitespace collapsed to one space
#[must_use]
pub fn normalized_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn select_value(select: ElementRef<'_>) -> String {
    let options: Vec<ElementRef<'_>> = select
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "option")
        .collect();

    options
        .iter()
        .find(|o| o.value().attr("selected").is_some())
        .or_else(|| options.first())
        .map(|option| {
            option
                .value()
                .attr("value")
                .map_or_else(|| normalized_text(*option), str::to_string)
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dom::query;
    use scraper::Html;

    fn first<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
        query(selector, html.root_element()).unwrap().get(0).unwrap()
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_input_value() {
            let html = Html::parse_document(r#"<input value="Lorem ipsum">"#);
            assert_eq!(Value.extract(first(&html, "input")), "Lorem ipsum");
        }

        #[test]
        fn test_input_without_value() {
            let html = Html::parse_document("<input>");
            assert_eq!(Value.extract(first(&html, "input")), "");
        }

        #[test]
        fn test_empty_value_is_a_value() {
            let html = Html::parse_document(r#"<div value="" contenteditable="true"><b>x</b></div>"#);
            assert_eq!(Value.extract(first(&html, "div")), "");
        }

        #[test]
        fn test_contenteditable_inner_markup() {
            let html =
                Html::parse_document(r#"<div contenteditable="true"><b>Lorem ipsum</b></div>"#);
            assert_eq!(
                Value.extract(first(&html, "[contenteditable]")),
                "<b>Lorem ipsum</b>"
            );
        }

        #[test]
        fn test_contenteditable_false() {
            let html = Html::parse_document(r#"<div contenteditable="false"><b>x</b></div>"#);
            assert_eq!(Value.extract(first(&html, "div")), "");
        }

        #[test]
        fn test_contenteditable_empty_attribute() {
            let html = Html::parse_document(r#"<p contenteditable>plain <i>rich</i></p>"#);
            assert_eq!(Value.extract(first(&html, "p")), "plain <i>rich</i>");
        }

        #[test]
        fn test_plain_element() {
            let html = Html::parse_document("<span>text</span>");
            assert_eq!(Value.extract(first(&html, "span")), "");
        }

        #[test]
        fn test_textarea_content() {
            let html = Html::parse_document("<textarea>line one\nline two</textarea>");
            assert_eq!(Value.extract(first(&html, "textarea")), "line one\nline two");
        }

        #[test]
        fn test_select_selected_option() {
            let html = Html::parse_document(
                r#"<select><option value="a">A</option><option value="b" selected>B</option></select>"#,
            );
            assert_eq!(Value.extract(first(&html, "select")), "b");
        }

        #[test]
        fn test_select_defaults_to_first_option_text() {
            let html =
                Html::parse_document("<select><option> First </option><option>Second</option></select>");
            assert_eq!(Value.extract(first(&html, "select")), "First");
        }

        #[test]
        fn test_empty_select() {
            let html = Html::parse_document("<select></select>");
            assert_eq!(Value.extract(first(&html, "select")), "");
        }
    }

    mod other_extractor_tests {
        use super::*;

        #[test]
        fn test_text_normalized() {
            let html = Html::parse_document("<p>\n  Lorem   <b>ipsum</b>\n dolor </p>");
            assert_eq!(Text.extract(first(&html, "p")), "Lorem ipsum dolor");
        }

        #[test]
        fn test_attribute() {
            let html = Html::parse_document(r#"<a href="/home">Home</a>"#);
            let a = first(&html, "a");
            assert_eq!(
                Attribute("href".to_string()).extract(a),
                Some("/home".to_string())
            );
            assert_eq!(Attribute("title".to_string()).extract(a), None);
        }

        #[test]
        fn test_has_class() {
            let html = Html::parse_document(r#"<p class="is-active large">x</p>"#);
            let p = first(&html, "p");
            assert!(HasClass("is-active".to_string()).extract(p));
            assert!(!HasClass("active".to_string()).extract(p));
        }

        #[test]
        fn test_contains() {
            let html = Html::parse_document("<p>Lorem\n   ipsum</p>");
            let p = first(&html, "p");
            assert!(Contains("Lorem ipsum".to_string()).extract(p));
            assert!(!Contains("dolor".to_string()).extract(p));
        }

        #[test]
        fn test_closure_extractor() {
            let html = Html::parse_document(r#"<p data-n="3">x</p>"#);
            let data = |e: ElementRef<'_>| e.value().attr("data-n").map(str::len);
            assert_eq!(data.extract(first(&html, "p")), Some(1));
        }
    }
}
