//! Askama templates for the analysis form, results and error pages.
//!
//! Templates live in `crates/server/templates/`; every interpolated value is
//! HTML-escaped by askama.

use askama::Template;
use seoscope_core::{AnalysisResult, SectionResult};

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    title: &'static str,
}

impl Default for FormTemplate {
    fn default() -> Self {
        Self { title: "seoscope" }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    title: String,
    message: String,
}

impl ErrorTemplate {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    title: &'static str,
    source: String,
    error: Option<String>,
    page_title: String,
    meta_description: String,
    word_count: usize,
    readability: String,
    preview: String,
    keywords: Vec<String>,
    tfidf_keywords: Vec<String>,
    phrases: Vec<String>,
    recommendations: Vec<String>,
    sections: Vec<SectionView>,
    /// Built by the server from a uuid and a hex signature, so it is emitted unescaped.
    download_link: String,
}

/// View model for one detected section.
struct SectionView {
    label: String,
    word_count: usize,
    readability: String,
    keywords: Vec<String>,
    phrases: Vec<String>,
}

impl SectionView {
    fn from_section(section: &SectionResult) -> Self {
        Self {
            label: section.label.clone(),
            word_count: section.word_count,
            readability: format!("{:.2}", section.readability),
            keywords: counts(&section.top_keywords),
            phrases: section.noun_phrases.clone(),
        }
    }
}

fn counts(keywords: &[(String, usize)]) -> Vec<String> {
    keywords.iter().map(|(keyword, count)| format!("{}: {}", keyword, count)).collect()
}

impl ResultsTemplate {
    pub fn from_result(result: &AnalysisResult, download_link: String, preview_chars: usize) -> Self {
        Self {
            title: "seoscope results",
            source: result.source.describe(),
            error: result.error.clone(),
            page_title: result.title.clone(),
            meta_description: result.meta_description.clone(),
            word_count: result.word_count,
            readability: format!("{:.2}", result.readability),
            preview: result.preview(preview_chars),
            keywords: counts(&result.top_keywords_freq),
            tfidf_keywords: result
                .top_keywords_tfidf
                .iter()
                .map(|(keyword, score)| format!("{}: {:.4}", keyword, score))
                .collect(),
            phrases: result.noun_phrases.clone(),
            recommendations: result.recommendations.clone(),
            sections: result.sections.iter().map(SectionView::from_section).collect(),
            download_link,
        }
    }
}
