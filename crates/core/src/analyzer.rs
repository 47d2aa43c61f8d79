//! Analysis pipeline: fetch, extract, score, recommend.
//!
//! The `try_*` methods return an explicit [`AnalysisFailure`]; the plain
//! methods are the outer boundary and always hand back an
//! [`AnalysisResult`], degraded when something went wrong.
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::Analyzer;
//!
//! let analyzer = Analyzer::default();
//! let result = analyzer.analyze_text("Short test.");
//! assert_eq!(result.word_count, 2);
//! assert_eq!(result.title, "Untitled");
//! ```

use std::str::FromStr;
use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::error::AnalysisFailure;
use crate::extract::main_text;
use crate::parse::Document;
use crate::recommend::recommendations;
use crate::report::{AnalysisResult, NO_META_DESCRIPTION, SectionResult, Source, UNTITLED};
use crate::scorer::TextScorer;
use crate::sections::detect_sections;
use crate::SeoscopeError;

/// What the user submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Url,
    Text,
}

impl FromStr for InputType {
    type Err = SeoscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "text" => Ok(Self::Text),
            other => Err(SeoscopeError::InvalidInput(format!("unknown input type '{}' (expected url or text)", other))),
        }
    }
}

/// Runs the whole analysis for one input.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    scorer: Arc<TextScorer>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer {
    /// Analyzer with its own scorer built from `config`.
    pub fn new(config: AnalyzerConfig) -> Self {
        let scorer = Arc::new(TextScorer::new(&config.thresholds));
        Self { config, scorer }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn scorer(&self) -> &TextScorer {
        &self.scorer
    }

    /// Dispatches on the submitted input type.
    #[cfg(feature = "fetch")]
    pub async fn analyze(&self, input_type: InputType, user_input: &str) -> AnalysisResult {
        match input_type {
            InputType::Url => self.analyze_url(user_input.trim()).await,
            InputType::Text => self.analyze_text(user_input),
        }
    }

    /// Analyses raw text. Title and description are fixed placeholders.
    pub fn analyze_text(&self, text: &str) -> AnalysisResult {
        let mut result = AnalysisResult::new(Source::DirectText);
        result.title = UNTITLED.to_string();
        result.meta_description = NO_META_DESCRIPTION.to_string();
        result.text = text.trim().to_string();
        result.word_count = text.split_whitespace().count();

        if !text.trim().is_empty() {
            self.apply_score(&mut result, text);
        }
        result.recommendations = recommendations(&result, &self.config.thresholds);
        result
    }

    /// Fetches and analyses a page, folding every failure into the result.
    #[cfg(feature = "fetch")]
    pub async fn analyze_url(&self, url: &str) -> AnalysisResult {
        match self.try_analyze_url(url).await {
            Ok(result) => result,
            Err(failure) => self.recover(failure, Source::Url(url.to_string())),
        }
    }

    /// Fetches and analyses a page.
    ///
    /// # Errors
    ///
    /// [`AnalysisFailure::Fetch`] when the page cannot be retrieved, and
    /// [`AnalysisFailure::Parse`] when it holds no readable text.
    #[cfg(feature = "fetch")]
    pub async fn try_analyze_url(&self, url: &str) -> Result<AnalysisResult, AnalysisFailure> {
        let html = crate::fetch::fetch_url(url, &self.config.fetch).await.map_err(AnalysisFailure::Fetch)?;
        tracing::debug!(url, bytes = html.len(), "fetched page");
        self.try_analyze_html(&html, Source::Url(url.to_string()))
    }

    /// Analyses an HTML document already in memory.
    pub fn analyze_html(&self, html: &str, source: Source) -> AnalysisResult {
        match self.try_analyze_html(html, source.clone()) {
            Ok(result) => result,
            Err(failure) => self.recover(failure, source),
        }
    }

    /// Extracts and scores an HTML document.
    ///
    /// # Errors
    ///
    /// [`AnalysisFailure::Parse`] with the title and description found so
    /// far when the page has no readable body text.
    pub fn try_analyze_html(&self, html: &str, source: Source) -> Result<AnalysisResult, AnalysisFailure> {
        let doc = Document::parse(html).map_err(|reason| AnalysisFailure::Parse {
            partial: Box::new(AnalysisResult::new(source.clone())),
            reason,
        })?;

        let mut result = AnalysisResult::new(source);
        let metadata = doc.extract_metadata();
        if let Some(title) = metadata.title {
            result.title = title;
        }
        if let Some(description) = metadata.description {
            result.meta_description = description;
        }

        let text = main_text(&doc, &self.config.extract);
        if text.trim().is_empty() {
            return Err(AnalysisFailure::Parse { partial: Box::new(result), reason: SeoscopeError::NoContent });
        }

        result.text = text.trim().to_string();
        result.word_count = text.split_whitespace().count();
        self.apply_score(&mut result, &text);
        result.recommendations = recommendations(&result, &self.config.thresholds);

        result.sections = detect_sections(&doc, self.config.thresholds.section_min_words)
            .into_iter()
            .map(|section| {
                let score = self.scorer.score(&section.text);
                SectionResult {
                    label: section.label,
                    word_count: score.word_count,
                    readability: score.readability.unwrap_or_default(),
                    top_keywords: score.frequency_keywords,
                    tfidf_keywords: score.tfidf_keywords,
                    noun_phrases: score.noun_phrases,
                }
            })
            .collect();

        Ok(result)
    }

    fn apply_score(&self, result: &mut AnalysisResult, text: &str) {
        let score = self.scorer.score(text);
        if let Some(readability) = score.readability {
            result.readability = readability;
        }
        result.top_keywords_freq = score.frequency_keywords;
        result.top_keywords_tfidf = score.tfidf_keywords;
        result.noun_phrases = score.noun_phrases;
    }

    fn recover(&self, failure: AnalysisFailure, source: Source) -> AnalysisResult {
        tracing::warn!(error = %failure.reason(), "analysis degraded");
        match failure {
            AnalysisFailure::Fetch(_) => AnalysisResult::fetch_failed(source),
            AnalysisFailure::Parse { partial, .. } => *partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FETCH_FAILED, NOT_FOUND};

    fn words(n: usize) -> String {
        (1..=n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_input_type_from_str() {
        assert_eq!("url".parse::<InputType>().unwrap(), InputType::Url);
        assert_eq!(" Text ".parse::<InputType>().unwrap(), InputType::Text);
        assert!("file".parse::<InputType>().is_err());
    }

    #[test]
    fn test_short_direct_text() {
        let result = Analyzer::default().analyze_text("Short test.");
        assert_eq!(result.word_count, 2);
        assert_eq!(result.title, "Untitled");
        assert_eq!(result.meta_description, "No meta description");
        assert_eq!(result.source, Source::DirectText);
        assert!(result.sections.is_empty());
        assert!(result.error.is_none());
        assert!(result.readability > 100.0);
    }

    #[test]
    fn test_whitespace_text_is_not_scored() {
        let result = Analyzer::default().analyze_text("   \n\t ");
        assert_eq!(result.word_count, 0);
        assert_eq!(result.readability, 0.0);
        assert!(result.top_keywords_freq.is_empty());
        assert!(result.top_keywords_tfidf.is_empty());
        assert!(result.noun_phrases.is_empty());
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_title_without_meta() {
        let html = "<html><head><title>Example</title></head><body><p>Some body text here.</p></body></html>";
        let result = Analyzer::default().analyze_html(html, Source::Url("https://example.com".into()));
        assert_eq!(result.title, "Example");
        assert_eq!(result.meta_description, NOT_FOUND);
        assert_eq!(result.word_count, 4);
    }

    #[test]
    fn test_empty_body_is_parse_failure() {
        let html = "<html><head><title>Example</title></head><body></body></html>";
        let analyzer = Analyzer::default();
        let failure = analyzer.try_analyze_html(html, Source::Url("https://example.com".into())).unwrap_err();
        assert!(matches!(failure, AnalysisFailure::Parse { .. }));

        let result = analyzer.analyze_html(html, Source::Url("https://example.com".into()));
        assert_eq!(result.title, "Example");
        assert!(result.error.is_none());
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn test_labelled_tab_pane_section() {
        let html = format!(
            r#"<html><head><title>Plans</title></head><body>
                <h2 id="pricing-tab">Pricing</h2>
                <div class="tab-pane" aria-labelledby="pricing-tab"><p>{}</p></div>
            </body></html>"#,
            words(25)
        );
        let result = Analyzer::default().analyze_html(&html, Source::Url("https://example.com".into()));
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].label, "Pricing");
        assert_eq!(result.sections[0].word_count, 25);
    }

    #[test]
    fn test_section_threshold_is_configurable() {
        let html = format!(r#"<html><body><section><p>{}</p></section></body></html>"#, words(8));
        let config = AnalyzerConfig::builder().section_min_words(5).build();
        let result = Analyzer::new(config).analyze_html(&html, Source::DirectText);
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].label, "Section 1");
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_unreachable_url_degrades() {
        let config = AnalyzerConfig::builder().timeout(2).build();
        let result = Analyzer::new(config).analyze(InputType::Url, "http://127.0.0.1:9/").await;
        assert_eq!(result.error.as_deref(), Some(FETCH_FAILED));
        assert_eq!(result.title, NOT_FOUND);
        assert_eq!(result.meta_description, NOT_FOUND);
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_invalid_url_degrades() {
        let result = Analyzer::default().analyze_url("not a url").await;
        assert_eq!(result.error.as_deref(), Some(FETCH_FAILED));
    }
}
