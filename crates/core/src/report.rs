//! Analysis result types.
//!
//! An [`AnalysisResult`] is built fresh for every request. Every field has a
//! value from the start (sentinel strings, `0`, empty collections), so
//! renderers and formatters never have to deal with missing data.

use serde::Serialize;

/// Title or meta description that could not be found.
pub const NOT_FOUND: &str = "[NOT FOUND] Not found";

/// Main text when nothing readable was extracted.
pub const NO_CONTENT: &str = "[NOT FOUND] No readable content found.";

/// Title used for direct text input.
pub const UNTITLED: &str = "Untitled";

/// Meta description used for direct text input.
pub const NO_META_DESCRIPTION: &str = "No meta description";

/// User-facing message for every fetch failure.
pub const FETCH_FAILED: &str = "Website could not be found.";

/// Whether a title or description still carries the not-found sentinel.
pub fn is_not_found(value: &str) -> bool {
    value.to_lowercase().contains("not found")
}

/// Where the analysed content came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Source {
    Url(String),
    /// Local HTML file or `-` for stdin.
    File(String),
    DirectText,
}

impl Source {
    /// Host of a URL source without a leading `www.`.
    ///
    /// Falls back to stripping the scheme by hand when the URL does not parse.
    pub fn domain(&self) -> Option<String> {
        let Source::Url(raw) = self else { return None };

        let host = url::Url::parse(raw)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
            .unwrap_or_else(|| {
                let without_scheme = raw.split_once("://").map_or(raw.as_str(), |(_, rest)| rest);
                without_scheme.split('/').next().unwrap_or_default().to_string()
            });

        match host.strip_prefix("www.") {
            Some(bare) => Some(bare.to_string()),
            None => Some(host),
        }
    }

    /// One-line description for report headers.
    pub fn describe(&self) -> String {
        match self {
            Source::Url(_) => format!("Analyzed Website: {}", self.domain().unwrap_or_default()),
            Source::File(path) => format!("Analyzed File: {}", path),
            Source::DirectText => "Analyzed Input: Direct Text".to_string(),
        }
    }
}

/// Metrics for one detected tab, accordion or panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub label: String,
    pub word_count: usize,
    pub readability: f64,
    pub top_keywords: Vec<(String, usize)>,
    pub tfidf_keywords: Vec<(String, f64)>,
    pub noun_phrases: Vec<String>,
}

/// Everything computed for one analysed page or text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub title: String,
    pub meta_description: String,
    /// Main body text.
    pub text: String,
    pub word_count: usize,
    /// Flesch Reading Ease; `0.0` until computed.
    pub readability: f64,
    pub source: Source,
    pub error: Option<String>,
    pub top_keywords_freq: Vec<(String, usize)>,
    pub top_keywords_tfidf: Vec<(String, f64)>,
    pub noun_phrases: Vec<String>,
    pub recommendations: Vec<String>,
    pub sections: Vec<SectionResult>,
}

impl AnalysisResult {
    /// A result with every field at its sentinel or empty default.
    pub fn new(source: Source) -> Self {
        Self {
            title: NOT_FOUND.to_string(),
            meta_description: NOT_FOUND.to_string(),
            text: NO_CONTENT.to_string(),
            word_count: 0,
            readability: 0.0,
            source,
            error: None,
            top_keywords_freq: Vec::new(),
            top_keywords_tfidf: Vec::new(),
            noun_phrases: Vec::new(),
            recommendations: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Fresh result for a failed fetch: sentinels plus the fixed message.
    pub fn fetch_failed(source: Source) -> Self {
        Self { error: Some(FETCH_FAILED.to_string()), ..Self::new(source) }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// First `max_chars` characters of the main text, or `[NOT FOUND]`.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.is_empty() { "[NOT FOUND]".to_string() } else { self.text.chars().take(max_chars).collect() }
    }
}
