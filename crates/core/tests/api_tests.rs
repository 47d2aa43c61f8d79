//! Library API integration tests
use seoscope_core::report::{FETCH_FAILED, NOT_FOUND};
use seoscope_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_direct_text_scenario() {
    let result = Analyzer::default().analyze_text("Short test.");
    assert_eq!(result.word_count, 2);
    assert_eq!(result.title, "Untitled");
    assert!(result.sections.is_empty());
}

#[tokio::test]
async fn test_unreachable_url_scenario() {
    let analyzer = Analyzer::new(AnalyzerConfig::builder().timeout(2).build());
    let result = analyzer.analyze(InputType::Url, "http://127.0.0.1:9/missing").await;
    assert_eq!(result.error.as_deref(), Some(FETCH_FAILED));
    assert_eq!(result.title, NOT_FOUND);
    assert_eq!(result.meta_description, NOT_FOUND);
}

#[test]
fn test_title_without_meta_scenario() {
    let html = read_fixture("empty_content.html");
    let result = Analyzer::default().analyze_html(&html, Source::Url("https://example.com".into()));
    assert_eq!(result.title, "Example");
    assert_eq!(result.meta_description, NOT_FOUND);
}

#[test]
fn test_labelled_tab_scenario() {
    let html = read_fixture("tabs.html");
    let result = Analyzer::default().analyze_html(&html, Source::Url("https://example.com/plans".into()));
    assert_eq!(result.sections.len(), 1);
    assert_eq!(result.sections[0].label, "Pricing");
    assert_eq!(result.sections[0].word_count, 25);
}

#[test]
fn test_article_analysis() {
    let html = read_fixture("article.html");
    let result = Analyzer::default().analyze_html(&html, Source::Url("https://www.beanandbarrel.com/roasting".into()));

    assert_eq!(result.title, "Coffee Roasting Basics | Bean & Barrel");
    assert!(result.meta_description.starts_with("Learn how home coffee roasting works"));
    assert!(result.text.contains("first crack"));
    assert!(!result.text.contains("newsletter"));
    assert!(!result.text.contains("analytics"));
    assert_eq!(result.word_count, result.text.split_whitespace().count());
    assert!(result.readability > 0.0);
    assert!(result.top_keywords_freq.len() <= 10);
    assert!(!result.top_keywords_tfidf.is_empty());
    assert!(result.error.is_none());

    let labels: Vec<&str> = result.sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Storage"]);
    assert!(result.sections.iter().all(|s| s.word_count > 20));

    assert!(result.recommendations.contains(&"Increase word count to at least 300 for SEO effectiveness.".to_string()));
    assert!(!result.recommendations.iter().any(|r| r.contains("meta description")));
}

#[test]
fn test_frequency_properties() {
    let texts = [
        "alpha beta alpha gamma beta alpha",
        "The quick brown fox jumps over the lazy dog. The dog sleeps.",
        "",
        "123 456 !!!",
    ];
    for text in texts {
        let keywords = top_frequency_keywords(text, 10);
        let qualifying = text.to_lowercase().split(|c: char| !c.is_ascii_lowercase()).filter(|w| w.len() >= 3).count();
        let total: usize = keywords.iter().map(|(_, c)| c).sum();
        assert!(total <= qualifying);
        if let Some((_, first)) = keywords.first() {
            assert!(keywords.iter().all(|(_, c)| c <= first));
        }
    }
}

#[test]
fn test_word_count_matches_whitespace_split() {
    for text in ["one", "  two  words ", "tabs\tand\nnewlines here", "punctuation , counts ."] {
        let result = Analyzer::default().analyze_text(text);
        assert_eq!(result.word_count, text.split_whitespace().count());
    }
}

#[test]
fn test_report_round_trip() {
    let html = read_fixture("article.html");
    let result = Analyzer::default().analyze_html(&html, Source::Url("https://beanandbarrel.com".into()));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    ReportRenderer::default().render_to_file(&result, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert!(doc.get_pages().len() > result.sections.len());
}

#[test]
fn test_json_output() {
    let result = Analyzer::default().analyze_text("Search engines like clear, simple writing.");
    let json = convert_to_json(&result, &JsonConfig { include_text: true, ..Default::default() }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["title"], "Untitled");
    assert_eq!(value["source"]["kind"], "direct_text");
}

#[test]
fn test_analyzer_builder() {
    let config = AnalyzerConfig::builder().min_word_count(1).min_keywords(0).build();
    let result = Analyzer::new(config).analyze_text("Readable words.");
    assert!(!result.recommendations.iter().any(|r| r.contains("word count")));
}
