//! Main-content extraction.
//!
//! Block elements are scored with [`calculate_score`]; paragraph-like
//! candidates feed their score to their parent (in full) and grandparent
//! (half). The best candidate plus qualifying siblings become the body text.
//! When nothing clears the threshold, [`main_text`] falls back to the text
//! of every `<p>` on the page.

use crate::parse::{Document, Element};
use crate::scoring::{ScoreConfig, calculate_score, link_density};
use crate::{Result, SeoscopeError};

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum score the top candidate must reach
    pub min_score_threshold: f64,
    /// Minimum character threshold; elements below a tenth of it are skipped
    pub char_threshold: usize,
    /// Maximum elements to consider (0 = unlimited)
    pub max_elements: usize,
    /// Sibling score threshold (multiplier of top score)
    pub sibling_threshold: f64,
    /// Scoring weights
    pub score: ScoreConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_score_threshold: 10.0,
            char_threshold: 250,
            max_elements: 1000,
            sibling_threshold: 0.2,
            score: ScoreConfig::default(),
        }
    }
}

/// The result of content extraction
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Main text, one block per line
    pub text: String,
    /// The top candidate score
    pub top_score: f64,
    /// Number of elements combined into `text`
    pub element_count: usize,
}

struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

const CANDIDATE_SELECTOR: &str = "article, section, main, div, td, pre, blockquote, p";

fn identify_candidates<'a>(doc: &'a Document, config: &ExtractConfig) -> Result<Vec<Candidate<'a>>> {
    let max_elements = if config.max_elements == 0 { usize::MAX } else { config.max_elements };
    let min_chars = config.char_threshold / 10;
    let mut candidates = Vec::new();

    for element in doc.select(CANDIDATE_SELECTOR)?.into_iter().take(max_elements) {
        let tag = element.tag_name();
        let structural = matches!(tag.as_str(), "article" | "section" | "main");
        if !structural && element.visible_text(" ").chars().count() < min_chars {
            continue;
        }
        let score = calculate_score(&element, &config.score).final_score;
        candidates.push(Candidate { element, score });
    }

    Ok(candidates)
}

/// Add `boost` to the candidate for `element`, creating it if needed.
fn boost<'a>(candidates: &mut Vec<Candidate<'a>>, element: Element<'a>, amount: f64, config: &ScoreConfig) {
    if let Some(existing) = candidates.iter_mut().find(|c| c.element.same_node(&element)) {
        existing.score += amount;
        return;
    }
    if matches!(element.tag_name().as_str(), "body" | "html") {
        return;
    }
    let score = calculate_score(&element, config).final_score + amount;
    candidates.push(Candidate { element, score });
}

fn propagate_scores<'a>(candidates: &mut Vec<Candidate<'a>>, config: &ScoreConfig) {
    let contributions: Vec<(Element<'a>, f64)> = candidates
        .iter()
        .filter(|c| matches!(c.element.tag_name().as_str(), "p" | "pre" | "td" | "blockquote"))
        .filter(|c| c.score > 0.0)
        .map(|c| (c.element.clone(), c.score))
        .collect();

    for (element, score) in contributions {
        let Some(parent) = element.parent() else { continue };
        let grandparent = parent.parent();
        boost(candidates, parent, score, config);
        if let Some(grandparent) = grandparent {
            boost(candidates, grandparent, score / 2.0, config);
        }
    }
}

fn is_sibling_of(candidate: &Element<'_>, top: &Element<'_>) -> bool {
    match (candidate.parent(), top.parent()) {
        (Some(a), Some(b)) => a.same_node(&b),
        _ => false,
    }
}

/// Extract the main content block from a document.
///
/// # Errors
///
/// [`SeoscopeError::NoContent`] when there are no candidates at all, and
/// [`SeoscopeError::NotReadable`] when the best one scores too low.
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    let mut candidates = identify_candidates(doc, config)?;
    propagate_scores(&mut candidates, &config.score);

    let top_index = candidates
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .ok_or(SeoscopeError::NoContent)?;

    let top = &candidates[top_index];
    if top.score < config.min_score_threshold {
        return Err(SeoscopeError::NotReadable { score: top.score, threshold: config.min_score_threshold });
    }

    let mut blocks = vec![top.element.block_text()];
    for candidate in &candidates {
        if candidate.element.same_node(&top.element)
            || candidate.score < top.score * config.sibling_threshold
            || !is_sibling_of(&candidate.element, &top.element)
        {
            continue;
        }
        if candidate.element.tag_name() == "p" {
            let long_enough = candidate.element.visible_text(" ").chars().count() > 80;
            if !long_enough || link_density(&candidate.element) >= 0.25 {
                continue;
            }
        }
        blocks.push(candidate.element.block_text());
    }

    let element_count = blocks.len();
    let text = blocks.into_iter().filter(|b| !b.is_empty()).collect::<Vec<_>>().join("\n");
    if text.trim().is_empty() {
        return Err(SeoscopeError::NoContent);
    }

    Ok(ExtractedContent { text, top_score: top.score, element_count })
}

/// Every `<p>` on the page, one per line.
pub fn paragraph_text(doc: &Document) -> String {
    doc.select("p")
        .unwrap_or_default()
        .iter()
        .map(|p| p.visible_text(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Main body text: the scored extraction, or the paragraph fallback.
pub fn main_text(doc: &Document, config: &ExtractConfig) -> String {
    match extract_content(doc, config) {
        Ok(extracted) => extracted.text,
        Err(err) => {
            tracing::debug!(error = %err, "main content extraction failed, falling back to paragraphs");
            paragraph_text(doc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_HTML: &str = r#"
        <html>
            <body>
                <nav class="menu"><a href="/">Home</a> <a href="/about">About</a></nav>
                <div class="sidebar">Sidebar promo text that should not be the main content.</div>
                <article class="main-content">
                    <h1>Article Title</h1>
                    <p>This is a long paragraph with lots of content to ensure it meets the character threshold,
                    and it continues with more text, more clauses, and even more words to raise its density.</p>
                    <p>Another paragraph with substantial content. It has multiple sentences, commas for density,
                    and enough text to be considered meaningful content by the scoring pass.</p>
                </article>
                <footer class="footer">Copyright notice</footer>
            </body>
        </html>
    "#;

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.min_score_threshold, 10.0);
        assert_eq!(config.max_elements, 1000);
        assert_eq!(config.sibling_threshold, 0.2);
    }

    #[test]
    fn test_extracts_article_body() {
        let doc = Document::parse(ARTICLE_HTML).unwrap();
        let extracted = extract_content(&doc, &ExtractConfig::default()).unwrap();

        assert!(extracted.text.contains("long paragraph"));
        assert!(extracted.text.contains("Another paragraph"));
        assert!(!extracted.text.contains("Sidebar promo"));
        assert!(!extracted.text.contains("Copyright"));
        assert!(extracted.top_score >= 10.0);
    }

    #[test]
    fn test_navigation_only_is_not_readable() {
        let html = r##"
            <html><body>
                <nav class="menu"><a href="#">Link 1</a><a href="#">Link 2</a><a href="#">Link 3</a></nav>
                <div class="sidebar"><a href="#">Nav Link</a> <a href="#">Another Link</a></div>
            </body></html>
        "##;
        let doc = Document::parse(html).unwrap();
        let result = extract_content(&doc, &ExtractConfig::default());
        assert!(matches!(result, Err(SeoscopeError::NotReadable { .. }) | Err(SeoscopeError::NoContent)));
    }

    #[test]
    fn test_empty_document_has_no_content() {
        let doc = Document::parse("<html><body></body></html>").unwrap();
        assert!(matches!(extract_content(&doc, &ExtractConfig::default()), Err(SeoscopeError::NoContent)));
    }

    #[test]
    fn test_main_text_falls_back_to_paragraphs() {
        let html = r#"<html><body><ul class="menu"><li><p>First</p></li><li><p>Second</p></li></ul></body></html>"#;
        let doc = Document::parse(html).unwrap();
        assert_eq!(main_text(&doc, &ExtractConfig::default()), "First\nSecond");
    }
}
