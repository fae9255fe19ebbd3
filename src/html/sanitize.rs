use scraper::node::Node;
use scraper::{ElementRef, Html};

// Elements that never take a closing tag
const VOID_ELEMENTS: [&str; 8] = ["area", "base", "br", "col", "embed", "hr", "img", "wbr"];

/// Strips every attribute from a fragment except the `href` on anchors,
/// preserving element and text structure. Malformed or empty input yields an
/// empty fragment, never an error.
pub fn sanitize(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    let mut out = String::new();
    for child in html.root_element().children() {
        match child.value() {
            Node::Text(text) => push_escaped_text(text, &mut out),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    write_element(element, &mut out);
                }
            }
            // Comments, doctypes and processing instructions are dropped
            _ => {}
        }
    }
    out
}

fn write_element(element: ElementRef, out: &mut String) {
    let name = element.value().name();
    out.push('<');
    out.push_str(name);
    if name == "a" {
        if let Some(href) = element.value().attr("href") {
            out.push_str(" href=\"");
            push_escaped_attr(href, out);
            out.push('"');
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_escaped_text(text, out),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_element(child_element, out);
                }
            }
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

pub(crate) fn push_escaped_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_attributes() {
        let input = r#"<p class="lead" style="color:red">Say <em id="x">yes</em>.</p>"#;
        assert_eq!(sanitize(input), "<p>Say <em>yes</em>.</p>");
    }

    #[test]
    fn test_keeps_anchor_href_only() {
        let input = r#"<p><a href="/games/1" target="_blank" rel="nofollow">a game</a></p>"#;
        assert_eq!(sanitize(input), r#"<p><a href="/games/1">a game</a></p>"#);
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "   ");
        // html5ever repairs unclosed tags rather than erroring
        assert_eq!(sanitize("<p>open"), "<p>open</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(sanitize("<p>a &amp; b</p>"), "<p>a &amp; b</p>");
    }

    #[test]
    fn test_void_elements() {
        assert_eq!(sanitize("<p>one<br>two</p>"), "<p>one<br>two</p>");
    }
}
