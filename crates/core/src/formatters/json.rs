use crate::Result;
use crate::report::AnalysisResult;
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Include the full main text (otherwise only a preview)
    pub include_text: bool,
    /// Characters of main text kept when `include_text` is off
    pub preview_chars: usize,
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
}

/// Convert an analysis result to JSON
pub fn convert_to_json(result: &AnalysisResult, config: &JsonConfig) -> Result<String> {
    let mut value = serde_json::to_value(JsonOutput {
        result,
        preview: (!config.include_text).then(|| result.preview(config.preview_chars)),
    })?;

    if !config.include_text
        && let Some(object) = value.as_object_mut()
    {
        object.remove("text");
    }

    if config.pretty { Ok(serde_json::to_string_pretty(&value)?) } else { Ok(serde_json::to_string(&value)?) }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, result: &AnalysisResult) -> Result<String> {
        convert_to_json(result, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{SectionResult, Source};

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult::new(Source::Url("https://example.com".into()));
        result.title = "Example".into();
        result.text = "Body text that is fairly long".into();
        result.word_count = 6;
        result.top_keywords_freq = vec![("body".into(), 1)];
        result.sections = vec![SectionResult {
            label: "Pricing".into(),
            word_count: 25,
            readability: 70.0,
            top_keywords: vec![],
            tfidf_keywords: vec![],
            noun_phrases: vec![],
        }];
        result
    }

    #[test]
    fn test_full_json() {
        let config = JsonConfig { include_text: true, ..Default::default() };
        let json = convert_to_json(&sample(), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Example");
        assert_eq!(value["text"], "Body text that is fairly long");
        assert_eq!(value["source"]["kind"], "url");
        assert_eq!(value["top_keywords_freq"][0][0], "body");
        assert_eq!(value["sections"][0]["label"], "Pricing");
        assert!(value.get("preview").is_none());
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_preview_replaces_text() {
        let config = JsonConfig { include_text: false, preview_chars: 4, pretty: true };
        let json = convert_to_json(&sample(), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("text").is_none());
        assert_eq!(value["preview"], "Body");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_formatter() {
        let formatter = JsonFormatter::new(JsonConfig::default());
        assert!(formatter.convert(&sample()).unwrap().contains("\"word_count\":6"));
    }
}
