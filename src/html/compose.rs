use crate::html::sanitize::{push_escaped_text, sanitize};
use crate::html::segment::Section;

/// Serializes retained sections back into a single clean fragment: each
/// section becomes a heading element followed by its blocks, sections in
/// document order, the whole result passed through the sanitizer. Identical
/// input always produces byte-identical output.
pub fn compose(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        out.push_str("<h3>");
        push_escaped_text(&section.title, &mut out);
        out.push_str("</h3>");
        for block in &section.blocks {
            out.push_str(block);
        }
    }
    sanitize(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_renders_sections_in_order() {
        let sections = vec![
            Section {
                title: "Description".to_string(),
                blocks: vec!["<p>Say yes.</p>".to_string()],
            },
            Section {
                title: "Notes".to_string(),
                blocks: vec!["<ul><li>One</li></ul>".to_string()],
            },
        ];
        assert_eq!(
            compose(&sections),
            "<h3>Description</h3><p>Say yes.</p><h3>Notes</h3><ul><li>One</li></ul>"
        );
    }

    #[test]
    fn test_compose_sanitizes_block_attributes() {
        let sections = vec![Section {
            title: "Setup".to_string(),
            blocks: vec!["<p class=\"lead\">Stand in a <a href=\"/c\" rel=\"x\">circle</a>.</p>".to_string()],
        }];
        assert_eq!(
            compose(&sections),
            "<h3>Setup</h3><p>Stand in a <a href=\"/c\">circle</a>.</p>"
        );
    }

    #[test]
    fn test_compose_empty_is_empty() {
        assert_eq!(compose(&[]), "");
    }

    #[test]
    fn test_compose_is_deterministic() {
        let sections = vec![Section {
            title: "Rules".to_string(),
            blocks: vec!["<p>A &amp; B</p>".to_string()],
        }];
        assert_eq!(compose(&sections), compose(&sections));
    }
}
