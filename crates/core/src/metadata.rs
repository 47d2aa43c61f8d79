use crate::Document;

/// Page-level metadata relevant to search snippets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Document {
    /// Meta description with fallback:
    /// 1. `<meta name="description">`
    /// 2. `<meta property="og:description">`
    pub fn meta_description(&self) -> Option<String> {
        self.meta_content("meta[name=\"description\"]")
            .or_else(|| self.meta_content("meta[property=\"og:description\"]"))
    }

    /// Extract title and description at once.
    pub fn extract_metadata(&self) -> PageMetadata {
        PageMetadata { title: self.title(), description: self.meta_description() }
    }

    /// Trimmed, non-empty `content` of the first element matching `selector`.
    fn meta_content(&self, selector: &str) -> Option<String> {
        let elements = self.select(selector).ok()?;
        let content = elements.first()?.attr("content")?.trim();
        (!content.is_empty()).then(|| content.to_string())
    }
}
