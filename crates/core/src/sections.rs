//! Detection of tabbed, accordion and panel sub-sections.
//!
//! Content hidden behind tabs is still in the markup; each matching container
//! is analysed as its own section when it carries enough words.

use crate::parse::Document;

/// Structural selectors for tab, accordion and panel containers.
pub const SECTION_SELECTORS: &str =
    ".tab-content > div, .elementor-tab-content, .accordion-body, .panel-body, .tab-pane, section";

/// A section found in the page, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedSection {
    pub label: String,
    pub text: String,
}

impl DetectedSection {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Finds sections with more than `min_words` words of visible text.
///
/// Labels come from the element referenced by `aria-labelledby`, its text
/// nodes trimmed and joined without a separator; otherwise "Section N", N being the 1-based position among all matched containers
/// (including those later discarded).
pub fn detect_sections(doc: &Document, min_words: usize) -> Vec<DetectedSection> {
    let Ok(containers) = doc.select(SECTION_SELECTORS) else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    for (index, container) in containers.iter().enumerate() {
        let text = container.visible_text(" ");
        let words = text.split_whitespace().count();
        if words <= min_words {
            continue;
        }

        let label = container
            .attr("aria-labelledby")
            .and_then(|id| doc.element_by_id(id.trim()))
            .map(|el| el.visible_text("").split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| format!("Section {}", index + 1));

        tracing::debug!(label = %label, words, "section found");
        sections.push(DetectedSection { label, text });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (1..=n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_labelled_tab_pane() {
        let html = format!(
            r#"<html><body>
                <ul class="nav"><li><h3 id="tab-pricing">Pricing</h3></li></ul>
                <div class="tab-pane" aria-labelledby="tab-pricing"><p>{}</p></div>
            </body></html>"#,
            words(25)
        );
        let doc = Document::parse(&html).unwrap();
        let sections = detect_sections(&doc, 20);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label, "Pricing");
        assert_eq!(sections[0].word_count(), 25);
    }

    #[test]
    fn test_label_text_nodes_join_without_space() {
        let html = format!(
            r#"<html><body>
                <h2 id="t">Pri<span>cing</span></h2>
                <h2 id="u"> Shipping   options </h2>
                <div class="tab-pane" aria-labelledby="t">{}</div>
                <div class="tab-pane" aria-labelledby="u">{}</div>
            </body></html>"#,
            words(25),
            words(25)
        );
        let doc = Document::parse(&html).unwrap();
        let sections = detect_sections(&doc, 20);

        assert_eq!(sections[0].label, "Pricing");
        assert_eq!(sections[1].label, "Shipping options");
    }

    #[test]
    fn test_positional_label_counts_discarded_candidates() {
        let html = format!(
            r#"<html><body>
                <section>too short</section>
                <section>{}</section>
            </body></html>"#,
            words(30)
        );
        let doc = Document::parse(&html).unwrap();
        let sections = detect_sections(&doc, 20);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label, "Section 2");
    }

    #[test]
    fn test_exactly_threshold_is_dropped() {
        let html = format!(r#"<div class="accordion-body">{}</div>"#, words(20));
        let doc = Document::parse(&html).unwrap();
        assert!(detect_sections(&doc, 20).is_empty());
    }

    #[test]
    fn test_dangling_aria_reference_uses_position() {
        let html = format!(r#"<div class="panel-body" aria-labelledby="nope">{}</div>"#, words(21));
        let doc = Document::parse(&html).unwrap();
        let sections = detect_sections(&doc, 20);
        assert_eq!(sections[0].label, "Section 1");
    }

    #[test]
    fn test_tab_content_children() {
        let html = format!(
            r#"<div class="tab-content"><div>{}</div><div>{}</div></div>"#,
            words(22),
            words(3)
        );
        let doc = Document::parse(&html).unwrap();
        let sections = detect_sections(&doc, 20);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label, "Section 1");
    }
}
