//! HTML parsing and DOM navigation.
//!
//! [`Document`] wraps a parsed page and [`Element`] wraps a single node.
//! Text accessors skip `script`, `style`, `noscript` and `template` content:
//! [`Element::visible_text`] joins text nodes, [`Element::block_text`] keeps
//! one line per block element.
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::parse::Document;
//!
//! let doc = Document::parse("<html><head><title> Test </title></head><body><p>Hello</p></body></html>").unwrap();
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! assert_eq!(doc.select("p").unwrap().len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, SeoscopeError};

/// Elements whose text never reaches the reader.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "iframe"];

/// Elements that start a new line when flattening text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre", "td", "th", "br", "section",
    "article", "tr",
];

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from malformed markup, so this only fails for
    /// reasons outside the markup itself.
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self { html: Html::parse_document(html) })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SeoscopeError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|element| Element { element }).collect())
    }

    /// Trimmed content of the first `<title>` element, if non-empty.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Finds the element whose `id` attribute equals `id`.
    ///
    /// Ids are compared literally, so values that would need escaping in a
    /// CSS selector still resolve.
    pub fn element_by_id(&'_ self, id: &str) -> Option<Element<'_>> {
        let selector = Selector::parse("[id]").ok()?;
        self.html
            .select(&selector)
            .find(|el| el.value().attr("id") == Some(id))
            .map(|element| Element { element })
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Visible text nodes, each trimmed, empty ones dropped, joined by `separator`.
    pub fn visible_text(&self, separator: &str) -> String {
        let mut parts = Vec::new();
        collect_visible(self.element, &mut parts);
        parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Visible text with a line break after every block element.
    pub fn block_text(&self) -> String {
        let mut out = String::new();
        push_block_text(self.element, &mut out);
        out.lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Nearest ancestor that is an element.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(|element| Element { element })
    }

    /// Whether both wrappers point at the same node.
    pub fn same_node(&self, other: &Element<'_>) -> bool {
        self.element.id() == other.element.id()
    }

    /// Selects descendant elements using a CSS selector.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|element| Element { element }).collect())
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SeoscopeError::HtmlParseError(format!("Invalid selector: {}", e)))
}

fn is_hidden(element: &ElementRef<'_>) -> bool {
    HIDDEN_TAGS.contains(&element.value().name())
}

fn collect_visible<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            parts.push(&**text);
        } else if let Some(child_el) = ElementRef::wrap(child)
            && !is_hidden(&child_el)
        {
            collect_visible(child_el, parts);
        }
    }
}

fn push_block_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child)
            && !is_hidden(&child_el)
        {
            let block = BLOCK_TAGS.contains(&child_el.value().name());
            if block {
                out.push('\n');
            }
            push_block_text(child_el, out);
            if block {
                out.push('\n');
            }
        }
    }
}
