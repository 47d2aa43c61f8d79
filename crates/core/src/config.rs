//! Analyzer configuration.
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::builder()
//!     .timeout(5)
//!     .min_word_count(500)
//!     .top_n(15)
//!     .build();
//! assert_eq!(config.thresholds.min_word_count, 500);
//! ```

use crate::extract::ExtractConfig;
use crate::fetch::FetchConfig;

/// Heuristic cut-offs used by section detection, scoring and recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// A section is kept only with more words than this (default: 20).
    pub section_min_words: usize,
    /// Below this word count a longer page is recommended (default: 300).
    pub min_word_count: usize,
    /// Below this Flesch score simpler sentences are recommended (default: 50).
    pub min_readability: f64,
    /// Fewer frequency keywords than this triggers a recommendation (default: 5).
    pub min_keywords: usize,
    /// Length of keyword and phrase lists (default: 10).
    pub top_n: usize,
    /// TF-IDF vocabulary cap (default: 1000).
    pub tfidf_max_features: usize,
    /// Characters of main text shown in report previews (default: 500).
    pub preview_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            section_min_words: 20,
            min_word_count: 300,
            min_readability: 50.0,
            min_keywords: 5,
            top_n: 10,
            tfidf_max_features: 1000,
            preview_chars: 500,
        }
    }
}

/// Everything an [`crate::Analyzer`] needs besides its input.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub thresholds: Thresholds,
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the main-content extraction settings.
    pub fn extract(mut self, value: ExtractConfig) -> Self {
        self.config.extract = value;
        self
    }

    pub fn section_min_words(mut self, value: usize) -> Self {
        self.config.thresholds.section_min_words = value;
        self
    }

    pub fn min_word_count(mut self, value: usize) -> Self {
        self.config.thresholds.min_word_count = value;
        self
    }

    pub fn min_readability(mut self, value: f64) -> Self {
        self.config.thresholds.min_readability = value;
        self
    }

    pub fn min_keywords(mut self, value: usize) -> Self {
        self.config.thresholds.min_keywords = value;
        self
    }

    /// Sets how many keywords and phrases are kept.
    pub fn top_n(mut self, value: usize) -> Self {
        self.config.thresholds.top_n = value;
        self
    }

    pub fn tfidf_max_features(mut self, value: usize) -> Self {
        self.config.thresholds.tfidf_max_features = value;
        self
    }

    pub fn preview_chars(mut self, value: usize) -> Self {
        self.config.thresholds.preview_chars = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
