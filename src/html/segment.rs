use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::types::SourceConvention;

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static BOLD_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("strong, b").unwrap());

/// A titled run of content blocks extracted from a fragment, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    /// Serialized retained block elements (p, ul, ol, blockquote, pre)
    pub blocks: Vec<String>,
}

/// Which heading representation a fragment uses. Decided once per fragment:
/// explicit heading elements win whenever any are present; otherwise direct
/// children are scanned for bold-only paragraphs standing in for headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectionKind {
    Explicit,
    BoldParagraph,
}

/// A detected section introducer under one of the two representations.
enum HeadingMarker<'a> {
    Explicit(ElementRef<'a>),
    BoldParagraph(ElementRef<'a>),
}

impl<'a> HeadingMarker<'a> {
    fn detect(element: ElementRef<'a>, kind: DetectionKind) -> Option<Self> {
        match kind {
            DetectionKind::Explicit => {
                if is_heading_name(element.value().name()) {
                    Some(HeadingMarker::Explicit(element))
                } else {
                    None
                }
            }
            DetectionKind::BoldParagraph => {
                if element.value().name() != "p" {
                    return None;
                }
                let bold_runs: Vec<ElementRef> = element.select(&BOLD_SELECTOR).collect();
                if bold_runs.len() != 1 {
                    return None;
                }
                let paragraph_text = element.text().collect::<String>();
                let bold_text = bold_runs[0].text().collect::<String>();
                if !paragraph_text.trim().is_empty() && paragraph_text.trim() == bold_text.trim() {
                    Some(HeadingMarker::BoldParagraph(element))
                } else {
                    None
                }
            }
        }
    }

    fn title(&self) -> String {
        let element = match self {
            HeadingMarker::Explicit(element) => element,
            HeadingMarker::BoldParagraph(element) => element,
        };
        element.text().collect::<String>().trim().to_string()
    }
}

fn is_heading_name(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_content_block(name: &str) -> bool {
    matches!(name, "p" | "ul" | "ol" | "blockquote" | "pre")
}

/// Splits a fragment into ordered named sections under the provider's
/// convention. A section runs from just after its heading marker up to the
/// next marker of the same kind or the end of the container. Titles on the
/// skip-list are dropped together with their content, as are sections with no
/// retained blocks. A fragment with no recognizable structure yields zero
/// sections, never an error.
pub fn segment(
    fragment: &str,
    source: SourceConvention,
    skip_sections: &HashSet<String>,
) -> Vec<Section> {
    let html = Html::parse_fragment(fragment);

    // The scrape stage usually captures the content column directly, so fall
    // back to the fragment root when the provider selector has nothing to match.
    let root_selector = Selector::parse(source.content_root()).unwrap();
    let container = html
        .select(&root_selector)
        .next()
        .unwrap_or_else(|| html.root_element());

    let kind = if container.select(&HEADING_SELECTOR).next().is_some() {
        DetectionKind::Explicit
    } else {
        DetectionKind::BoldParagraph
    };
    debug!(provider = source.provider_name(), ?kind, "segmenting fragment");

    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for child in container.children() {
        let element = match ElementRef::wrap(child) {
            Some(element) => element,
            None => continue,
        };

        if let Some(marker) = HeadingMarker::detect(element, kind) {
            push_section(&mut sections, current.take(), skip_sections);
            current = Some(Section {
                title: marker.title(),
                blocks: Vec::new(),
            });
        } else if is_content_block(element.value().name()) {
            if let Some(section) = current.as_mut() {
                section.blocks.push(element.html());
            }
        }
        // Any other element between markers is noise (embedded widgets etc.)
        // and is dropped.
    }
    push_section(&mut sections, current.take(), skip_sections);

    sections
}

fn push_section(sections: &mut Vec<Section>, section: Option<Section>, skip: &HashSet<String>) {
    if let Some(section) = section {
        if section.blocks.is_empty() {
            return;
        }
        if skip.contains(&section.title.to_lowercase()) {
            return;
        }
        sections.push(section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(titles: &[&str]) -> HashSet<String> {
        titles.iter().map(|t| t.to_lowercase()).collect()
    }

    #[test]
    fn test_explicit_headings_with_skip_list() {
        let fragment = "<h3>Description</h3><p>Say yes.</p><h3>Credits</h3><p>Site X</p>";
        let sections = segment(fragment, SourceConvention::Improwiki, &skip(&["Credits"]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Description");
        assert_eq!(sections[0].blocks, vec!["<p>Say yes.</p>".to_string()]);
    }

    #[test]
    fn test_bold_paragraph_fallback() {
        let fragment = "<p><strong>Setup</strong></p><p>Stand in a circle.</p>";
        let sections = segment(fragment, SourceConvention::Encyclopedia, &skip(&[]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Setup");
        assert_eq!(sections[0].blocks, vec!["<p>Stand in a circle.</p>".to_string()]);
    }

    #[test]
    fn test_explicit_heading_wins_over_bold_paragraph() {
        // A bold-only paragraph is ordinary content once any real heading exists
        let fragment = "<h2>Rules</h2><p><strong>Setup</strong></p><p>Form two lines.</p>";
        let sections = segment(fragment, SourceConvention::Improwiki, &skip(&[]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Rules");
        assert_eq!(sections[0].blocks.len(), 2);
    }

    #[test]
    fn test_unrecognized_blocks_are_dropped() {
        let fragment = "<h3>Notes</h3><div>widget</div><table><tr><td>x</td></tr></table><p>Keep this.</p>";
        let sections = segment(fragment, SourceConvention::Improwiki, &skip(&[]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].blocks, vec!["<p>Keep this.</p>".to_string()]);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let fragment = "<h3>Variations</h3><h3>Notes</h3><p>One note.</p>";
        let sections = segment(fragment, SourceConvention::Improwiki, &skip(&[]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Notes");
    }

    #[test]
    fn test_content_root_selector_is_honored() {
        let fragment = "<div class=\"entry-content\"><h3>Notes</h3><p>Inside.</p></div><p>Outside.</p>";
        let sections = segment(fragment, SourceConvention::Improwiki, &skip(&[]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].blocks, vec!["<p>Inside.</p>".to_string()]);
    }

    #[test]
    fn test_pure_prose_yields_no_sections() {
        let fragment = "<p>Just a paragraph.</p><p>And another.</p>";
        let sections = segment(fragment, SourceConvention::Encyclopedia, &skip(&[]));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_lists_and_quotes_are_retained() {
        let fragment =
            "<h3>Rules</h3><ul><li>One</li></ul><blockquote>Quote</blockquote><pre>code</pre>";
        let sections = segment(fragment, SourceConvention::Improwiki, &skip(&[]));
        assert_eq!(sections[0].blocks.len(), 3);
    }
}
