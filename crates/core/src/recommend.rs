//! Rule-based improvement suggestions.
//!
//! Every rule is checked independently; all matching rules fire, in the
//! order of [`Rule::ALL`].

use crate::config::Thresholds;
use crate::report::{AnalysisResult, is_not_found};

/// A single recommendation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    WordCount,
    Readability,
    MetaDescription,
    Keywords,
    Title,
}

impl Rule {
    pub const ALL: [Rule; 5] = [Rule::WordCount, Rule::Readability, Rule::MetaDescription, Rule::Keywords, Rule::Title];

    /// Suggestion shown when the rule fires.
    ///
    /// The word-count message quotes the configured minimum.
    pub fn message(self, thresholds: &Thresholds) -> String {
        match self {
            Rule::WordCount => {
                format!("Increase word count to at least {} for SEO effectiveness.", thresholds.min_word_count)
            }
            Rule::Readability => "Improve readability by simplifying sentence structure.".to_string(),
            Rule::MetaDescription => "Add a relevant meta description including target keywords.".to_string(),
            Rule::Keywords => "Add more keyword-rich content to improve relevance.".to_string(),
            Rule::Title => "Add a unique, keyword-rich title tag.".to_string(),
        }
    }

    /// Whether the rule fires for `result`.
    pub fn applies(self, result: &AnalysisResult, thresholds: &Thresholds) -> bool {
        match self {
            Rule::WordCount => result.word_count < thresholds.min_word_count,
            Rule::Readability => result.readability < thresholds.min_readability,
            Rule::MetaDescription => is_not_found(&result.meta_description),
            Rule::Keywords => result.top_keywords_freq.len() < thresholds.min_keywords,
            Rule::Title => is_not_found(&result.title),
        }
    }
}

/// Messages of every rule that applies, in rule order.
pub fn recommendations(result: &AnalysisResult, thresholds: &Thresholds) -> Vec<String> {
    Rule::ALL
        .iter()
        .filter(|rule| rule.applies(result, thresholds))
        .map(|rule| rule.message(thresholds))
        .collect()
}
