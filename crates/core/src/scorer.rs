//! Per-text metrics.
//!
//! [`TextScorer`] owns the phrase chunker's lexicon so it is loaded once and
//! shared by reference (or `Arc`) between analyses.

use crate::config::Thresholds;
use crate::keywords::{TfidfConfig, top_frequency_keywords, top_tfidf_keywords};
use crate::phrases::{Lexicon, PhraseChunker};
use crate::textstats::{flesch_reading_ease, word_count};

/// All metrics for one block of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextScore {
    pub word_count: usize,
    /// `None` for text without words.
    pub readability: Option<f64>,
    pub frequency_keywords: Vec<(String, usize)>,
    pub tfidf_keywords: Vec<(String, f64)>,
    pub noun_phrases: Vec<String>,
}

/// Computes word count, readability, keywords and noun phrases.
#[derive(Debug, Clone)]
pub struct TextScorer {
    chunker: PhraseChunker,
    tfidf: TfidfConfig,
    top_n: usize,
}

impl Default for TextScorer {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

impl TextScorer {
    /// Scorer with the built-in English lexicon.
    pub fn new(thresholds: &Thresholds) -> Self {
        Self::with_lexicon(Lexicon::english(), thresholds)
    }

    pub fn with_lexicon(lexicon: Lexicon, thresholds: &Thresholds) -> Self {
        Self {
            chunker: PhraseChunker::new(lexicon),
            tfidf: TfidfConfig { max_features: thresholds.tfidf_max_features, ..Default::default() },
            top_n: thresholds.top_n,
        }
    }

    pub fn chunker(&self) -> &PhraseChunker {
        &self.chunker
    }

    /// Scores `text`. Empty or whitespace-only input yields zero words, no
    /// readability and empty collections.
    pub fn score(&self, text: &str) -> TextScore {
        if text.trim().is_empty() {
            return TextScore::default();
        }

        TextScore {
            word_count: word_count(text),
            readability: flesch_reading_ease(text),
            frequency_keywords: top_frequency_keywords(text, self.top_n),
            tfidf_keywords: top_tfidf_keywords(text, self.top_n, &self.tfidf),
            noun_phrases: self.chunker.noun_phrases(text, self.top_n),
        }
    }
}
