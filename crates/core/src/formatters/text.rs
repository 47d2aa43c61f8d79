use crate::report::AnalysisResult;

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Characters of main text shown as a preview (0 = none)
    pub preview_chars: usize,

    /// Wrap preview lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Include one block per detected section
    pub include_sections: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { preview_chars: 500, line_width: 80, include_sections: true }
    }
}

/// Plain text formatter for terminal output
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, result: &AnalysisResult) -> String {
        convert_to_text(result, &self.config)
    }
}

/// Render an analysis result as a plain text summary
pub fn convert_to_text(result: &AnalysisResult, config: &TextConfig) -> String {
    let mut output = String::new();

    output.push_str(&heading(&result.title, '='));
    output.push_str(&result.source.describe());
    output.push('\n');

    if let Some(error) = &result.error {
        output.push_str(&format!("Error: {}\n", error));
    }

    output.push_str(&format!("Meta Description: {}\n", result.meta_description));
    output.push_str(&format!("Word Count: {}\n", result.word_count));
    output.push_str(&format!("Readability Score: {:.2}\n", result.readability));

    if config.preview_chars > 0 {
        output.push('\n');
        output.push_str(&heading("Content Preview", '-'));
        let preview = result.preview(config.preview_chars);
        let preview = if config.line_width > 0 { wrap_text(&preview, config.line_width) } else { preview };
        output.push_str(&preview);
        output.push('\n');
    }

    let freq: Vec<String> = result.top_keywords_freq.iter().map(|(k, c)| format!("{}: {}", k, c)).collect();
    push_list(&mut output, "Top Keywords by Frequency", &freq);

    let tfidf: Vec<String> = result.top_keywords_tfidf.iter().map(|(k, s)| format!("{}: {:.4}", k, s)).collect();
    push_list(&mut output, "Top Keywords by TF-IDF", &tfidf);

    push_list(&mut output, "Extracted Phrases", &result.noun_phrases);
    push_list(&mut output, "Recommendations", &result.recommendations);

    if config.include_sections {
        for section in &result.sections {
            output.push('\n');
            output.push_str(&heading(&format!("Section: {}", section.label), '-'));
            output.push_str(&format!("Word Count: {}\n", section.word_count));
            output.push_str(&format!("Readability Score: {:.2}\n", section.readability));
            let keywords: Vec<String> = section.top_keywords.iter().map(|(k, c)| format!("{}: {}", k, c)).collect();
            if !keywords.is_empty() {
                output.push_str(&format!("Top Keywords: {}\n", keywords.join(", ")));
            }
            if !section.noun_phrases.is_empty() {
                output.push_str(&format!("Noun Phrases: {}\n", section.noun_phrases.join(", ")));
            }
        }
    }

    output.trim_end().to_string()
}

fn heading(title: &str, underline: char) -> String {
    format!("{}\n{}\n", title, underline.to_string().repeat(title.chars().count()))
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push('\n');
    output.push_str(&heading(title, '-'));
    for item in items {
        output.push_str("- ");
        output.push_str(item);
        output.push('\n');
    }
}

/// Wrap text at specified width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();

    for line in text.lines() {
        if line.chars().count() <= width {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line.push_str(word);
            } else if current_line.chars().count() + 1 + word.chars().count() <= width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push_str(&current_line);
                result.push('\n');
                current_line = word.to_string();
            }
        }

        if !current_line.is_empty() {
            result.push_str(&current_line);
            result.push('\n');
        }
    }

    result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FETCH_FAILED, SectionResult, Source};

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult::new(Source::Url("https://www.example.com/about".into()));
        result.title = "About Us".into();
        result.text = "We build fast websites.".into();
        result.word_count = 4;
        result.readability = 82.3912;
        result.top_keywords_freq = vec![("build".into(), 1), ("fast".into(), 1)];
        result.top_keywords_tfidf = vec![("build".into(), 0.5)];
        result.recommendations = vec!["Add a unique, keyword-rich title tag.".into()];
        result
    }

    #[test]
    fn test_summary_fields() {
        let text = convert_to_text(&sample(), &TextConfig::default());
        assert!(text.starts_with("About Us\n========\n"));
        assert!(text.contains("Analyzed Website: example.com"));
        assert!(text.contains("Word Count: 4"));
        assert!(text.contains("Readability Score: 82.39"));
        assert!(text.contains("- build: 0.5000"));
        assert!(text.contains("We build fast websites."));
        assert!(!text.contains("Extracted Phrases"));
    }

    #[test]
    fn test_error_line() {
        let result = AnalysisResult::fetch_failed(Source::Url("https://nope.invalid".into()));
        let text = convert_to_text(&result, &TextConfig::default());
        assert!(text.contains(&format!("Error: {}", FETCH_FAILED)));
    }

    #[test]
    fn test_sections_toggle() {
        let mut result = sample();
        result.sections.push(SectionResult {
            label: "Pricing".into(),
            word_count: 25,
            readability: 61.0,
            top_keywords: vec![("plan".into(), 4)],
            tfidf_keywords: vec![],
            noun_phrases: vec!["monthly plan".into()],
        });

        let with = convert_to_text(&result, &TextConfig::default());
        assert!(with.contains("Section: Pricing"));
        assert!(with.contains("Top Keywords: plan: 4"));
        assert!(with.contains("Noun Phrases: monthly plan"));

        let config = TextConfig { include_sections: false, ..Default::default() };
        assert!(!convert_to_text(&result, &config).contains("Section: Pricing"));
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a long line that should be wrapped at a specific width";
        let wrapped = wrap_text(text, 20);
        assert!(wrapped.lines().all(|line| line.chars().count() <= 20));
    }
}
