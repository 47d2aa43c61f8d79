//! PDF report rendering.
//!
//! Layout is a simple top-to-bottom flow over US-Letter pages using the
//! standard Helvetica faces, so nothing has to be embedded. Pages are built
//! as printpdf operations; text is passed through [`sanitize`] first, and
//! printpdf encodes it as WinAnsi.
//!
//! # Example
//!
//! ```rust
//! use seoscope_core::{AnalysisResult, ReportRenderer, Source};
//!
//! let result = AnalysisResult::new(Source::DirectText);
//! let pdf = ReportRenderer::default().render(&result).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

use std::path::Path;

use printpdf::{
    BuiltinFont, Color, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, Point, Polygon, PolygonRing,
    Pt, TextItem, WindingOrder,
};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::config::Thresholds;
use crate::report::AnalysisResult;
use crate::sanitize::sanitize;
use crate::{Result, SeoscopeError};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 28.0;
const GUIDE_INDENT: f32 = 14.0;
const FOOTER_Y: f32 = 30.0;
const BOTTOM_LIMIT: f32 = 60.0;

/// Static explanations printed under "SEO Reference Guide".
pub const REFERENCE_GUIDE: [(&str, &str); 5] = [
    (
        "Title Tag:",
        "Appears in browser tabs and Google search results. It should be clear, concise, and include your target keywords.",
    ),
    (
        "Meta Description:",
        "Summarizes the page content in search results. A well-written description improves click-through rate.",
    ),
    (
        "Word Count:",
        "Pages with more useful content tend to rank better, especially when the content is original and relevant.",
    ),
    (
        "Readability Score:",
        "A higher Flesch Reading Ease score means your content is easier to read - important for retaining users.",
    ),
    (
        "Body Text:",
        "The main content on your page. It should be well-structured, use proper headings, and avoid keyword stuffing.",
    ),
];

/// Fixed strings and sizes for the report.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub report_title: String,
    pub copyright: String,
    pub footer: String,
    /// Characters of main text in the content preview.
    pub preview_chars: usize,
}

impl From<&Thresholds> for RenderConfig {
    /// Default strings with the preview length the analyzer was configured with.
    fn from(thresholds: &Thresholds) -> Self {
        Self { preview_chars: thresholds.preview_chars, ..Self::default() }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            report_title: "seoscope Report".to_string(),
            copyright: "Generated with seoscope. Metrics are heuristic estimates.".to_string(),
            footer: "Generated by seoscope".to_string(),
            preview_chars: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    fn builtin(self) -> BuiltinFont {
        match self {
            Font::Regular => BuiltinFont::Helvetica,
            Font::Bold => BuiltinFont::HelveticaBold,
            Font::Italic => BuiltinFont::HelveticaOblique,
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
            Font::Regular | Font::Italic => &HELVETICA_WIDTHS,
        }
    }
}

type Rgb = (f32, f32, f32);

const BLACK: Rgb = (0.0, 0.0, 0.0);
const WHITE: Rgb = (1.0, 1.0, 1.0);
const RED: Rgb = (0.86, 0.2, 0.2);
const GREY: Rgb = (0.59, 0.59, 0.59);
const BRAND: Rgb = (0.13, 0.35, 0.62);

fn fill(color: Rgb) -> Op {
    Op::SetFillColor { col: Color::Rgb(printpdf::Rgb::new(color.0, color.1, color.2, None)) }
}

fn point(x: f32, y: f32) -> Point {
    Point { x: Pt(x), y: Pt(y) }
}

/// Helvetica (and Helvetica-Oblique) advance widths for printable ASCII, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556,
    556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334,
    260, 334, 584,
];

/// Helvetica-Bold advance widths for printable ASCII, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556, 556, 556, 556, 556,
    556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611,
    556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389,
    280, 389, 584,
];

fn char_width(c: char, font: Font, size: f32) -> f32 {
    let code = c as u32;
    let units = if (32..127).contains(&code) { font.widths()[(code - 32) as usize] } else { 556 };
    units as f32 * size / 1000.0
}

fn text_width(text: &str, font: Font, size: f32) -> f32 {
    text.chars().map(|c| char_width(c, font, size)).sum()
}

/// Greedy word wrap; words wider than the line are split by character.
fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() { word.to_string() } else { format!("{} {}", line, word) };
            if text_width(&candidate, font, size) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for c in word.chars() {
                if !line.is_empty() && text_width(&line, font, size) + char_width(c, font, size) > max_width {
                    lines.push(std::mem::take(&mut line));
                }
                line.push(c);
            }
        }
        lines.push(line);
    }

    lines
}

/// Pages under construction and the current pen position.
struct Canvas {
    pages: Vec<Vec<Op>>,
    y: f32,
    left: f32,
    right: f32,
}

impl Canvas {
    fn new() -> Self {
        let mut canvas = Self { pages: Vec::new(), y: 0.0, left: MARGIN, right: PAGE_WIDTH - MARGIN };
        canvas.new_page();
        canvas
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ops(&mut self) -> &mut Vec<Op> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn ensure(&mut self, height: f32) {
        if self.y - height < BOTTOM_LIMIT {
            self.new_page();
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Font, size: f32, color: Rgb) {
        self.ops().extend(text_ops(text, x, y, font, size, color));
    }

    /// Wrapped text starting at the left margin.
    fn paragraph(&mut self, text: &str, font: Font, size: f32, line_height: f32, color: Rgb) {
        let width = self.right - self.left;
        for line in wrap(text, font, size, width) {
            self.ensure(line_height);
            self.y -= line_height;
            let (x, y) = (self.left, self.y + (line_height - size) / 2.0);
            self.draw_text(&line, x, y, font, size, color);
        }
    }

    fn line(&mut self, text: &str, font: Font, size: f32, line_height: f32) {
        self.paragraph(text, font, size, line_height, BLACK);
    }

    fn centered(&mut self, text: &str, font: Font, size: f32, line_height: f32) {
        self.ensure(line_height);
        self.y -= line_height;
        let x = (PAGE_WIDTH - text_width(text, font, size)) / 2.0;
        let y = self.y + (line_height - size) / 2.0;
        self.draw_text(text, x.max(self.left), y, font, size, BLACK);
    }

    fn logo(&mut self, x: f32, y_top: f32) {
        let (w, h) = (72.0, 28.0);
        let corners = [(x, y_top - h), (x + w, y_top - h), (x + w, y_top), (x, y_top)];
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: corners.iter().map(|&(px, py)| LinePoint { p: point(px, py), bezier: false }).collect(),
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };

        let ops = self.ops();
        ops.push(Op::SaveGraphicsState);
        ops.push(fill(BRAND));
        ops.push(Op::DrawPolygon { polygon });
        ops.push(Op::RestoreGraphicsState);
        self.draw_text("SEO", x + 16.0, y_top - h + 8.0, Font::Bold, 16.0, WHITE);
    }

    fn footer(&mut self, text: &str) {
        let size = 9.0;
        let x = (PAGE_WIDTH - text_width(text, Font::Italic, size)) / 2.0;
        for ops in &mut self.pages {
            ops.extend(text_ops(text, x, FOOTER_Y, Font::Italic, size, GREY));
        }
    }
}

fn text_ops(text: &str, x: f32, y: f32, font: Font, size: f32, color: Rgb) -> Vec<Op> {
    vec![
        Op::StartTextSection,
        Op::SetFontSizeBuiltinFont { size: Pt(size), font: font.builtin() },
        fill(color),
        Op::SetTextCursor { pos: point(x, y) },
        Op::WriteTextBuiltinFont { items: vec![TextItem::Text(text.to_string())], font: font.builtin() },
        Op::EndTextSection,
    ]
}

/// Lays out an [`AnalysisResult`] as a PDF document.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    config: RenderConfig,
}

impl ReportRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders with the current UTC time as the generation timestamp.
    pub fn render(&self, result: &AnalysisResult) -> Result<Vec<u8>> {
        self.render_at(result, OffsetDateTime::now_utc())
    }

    /// Renders and writes the PDF to `path`, creating parent directories.
    pub fn render_to_file(&self, result: &AnalysisResult, path: &Path) -> Result<()> {
        let bytes = self.render(result)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Renders with an explicit generation timestamp.
    pub fn render_at(&self, result: &AnalysisResult, generated: OffsetDateTime) -> Result<Vec<u8>> {
        let mut canvas = Canvas::new();

        self.header(&mut canvas, result, generated)?;
        self.core_fields(&mut canvas, result);
        self.reference_guide(&mut canvas);
        self.extended_analysis(&mut canvas, result);

        for section in &result.sections {
            tracing::debug!(label = %section.label, "rendering section page");
            canvas.new_page();
            canvas.line("Section-Level SEO Analysis", Font::Bold, 14.0, 22.0);
            canvas.gap(6.0);
            canvas.line(&sanitize(&format!("Section: {}", section.label)), Font::Bold, 12.0, 18.0);
            canvas.line(&format!("Word Count: {}", section.word_count), Font::Regular, 11.0, 16.0);
            canvas.line(&format!("Readability Score: {:.2}", section.readability), Font::Regular, 11.0, 16.0);

            canvas.line("Top Keywords:", Font::Bold, 11.0, 16.0);
            for (keyword, count) in &section.top_keywords {
                canvas.line(&sanitize(&format!("{}: {}", keyword, count)), Font::Regular, 11.0, 16.0);
            }

            if !section.noun_phrases.is_empty() {
                canvas.gap(4.0);
                canvas.line("Noun Phrases:", Font::Bold, 11.0, 16.0);
                canvas.line(&sanitize(&section.noun_phrases.join(", ")), Font::Regular, 11.0, 16.0);
            }
        }

        canvas.footer(&self.config.footer);
        Ok(assemble(&self.config.report_title, canvas.pages))
    }

    fn header(&self, canvas: &mut Canvas, result: &AnalysisResult, generated: OffsetDateTime) -> Result<()> {
        let top = canvas.y;
        canvas.logo(MARGIN, top);
        canvas.centered(&sanitize(&self.config.report_title), Font::Bold, 24.0, 30.0);
        canvas.centered(&sanitize(&self.config.copyright), Font::Regular, 9.0, 14.0);
        canvas.gap(24.0);

        let stamp = generated
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .map_err(|e| SeoscopeError::RenderError(e.to_string()))?;
        canvas.line(&format!("Generated: {} UTC", stamp), Font::Italic, 10.0, 20.0);
        canvas.line(&sanitize(&result.source.describe()), Font::Italic, 10.0, 20.0);
        canvas.gap(8.0);
        Ok(())
    }

    fn core_fields(&self, canvas: &mut Canvas, result: &AnalysisResult) {
        if let Some(error) = &result.error {
            canvas.paragraph(&sanitize(&format!("Error: {}", error)), Font::Regular, 12.0, 20.0, RED);
        }

        canvas.line(&format!("Title: {}", sanitize(&result.title)), Font::Regular, 12.0, 20.0);
        canvas.line(&format!("Meta Description: {}", sanitize(&result.meta_description)), Font::Regular, 12.0, 20.0);
        canvas.line(&format!("Word Count: {}", result.word_count), Font::Regular, 12.0, 20.0);
        canvas.line(&format!("Readability Score: {:.2}", result.readability), Font::Regular, 12.0, 20.0);

        canvas.gap(8.0);
        canvas.line("Content Preview:", Font::Bold, 12.0, 20.0);
        canvas.line(&sanitize(&result.preview(self.config.preview_chars)), Font::Regular, 11.0, 16.0);
    }

    fn reference_guide(&self, canvas: &mut Canvas) {
        canvas.gap(16.0);
        canvas.line("SEO Reference Guide", Font::Bold, 14.0, 22.0);
        canvas.gap(4.0);

        canvas.left += GUIDE_INDENT;
        canvas.right -= GUIDE_INDENT;
        for (heading, body) in REFERENCE_GUIDE {
            canvas.line(heading, Font::Bold, 11.0, 16.0);
            canvas.line(body, Font::Regular, 11.0, 16.0);
            canvas.gap(3.0);
        }
        canvas.left -= GUIDE_INDENT;
        canvas.right += GUIDE_INDENT;
    }

    fn extended_analysis(&self, canvas: &mut Canvas, result: &AnalysisResult) {
        canvas.gap(16.0);
        canvas.line("Extended SEO Analysis", Font::Bold, 14.0, 22.0);

        canvas.line("Top Keywords by Frequency", Font::Bold, 12.0, 18.0);
        for (keyword, count) in &result.top_keywords_freq {
            canvas.line(&sanitize(&format!("{}: {}", keyword, count)), Font::Regular, 11.0, 16.0);
        }

        canvas.gap(6.0);
        canvas.line("Top Keywords by TF-IDF", Font::Bold, 12.0, 18.0);
        for (keyword, score) in &result.top_keywords_tfidf {
            canvas.line(&sanitize(&format!("{}: {:.4}", keyword, score)), Font::Regular, 11.0, 16.0);
        }

        canvas.gap(6.0);
        canvas.line("Extracted Phrases", Font::Bold, 12.0, 18.0);
        for phrase in &result.noun_phrases {
            canvas.line(&sanitize(phrase), Font::Regular, 11.0, 16.0);
        }

        canvas.gap(6.0);
        canvas.line("SEO Recommendations", Font::Bold, 12.0, 18.0);
        for recommendation in &result.recommendations {
            canvas.line(&sanitize(recommendation), Font::Regular, 11.0, 16.0);
            canvas.gap(2.0);
        }
    }
}

fn assemble(title: &str, pages: Vec<Vec<Op>>) -> Vec<u8> {
    let pages = pages
        .into_iter()
        .map(|ops| PdfPage::new(Mm::from(Pt(PAGE_WIDTH)), Mm::from(Pt(PAGE_HEIGHT)), ops))
        .collect();

    let mut doc = PdfDocument::new(title);
    doc.with_pages(pages);

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "pdf serializer warnings");
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{SectionResult, Source};
    use time::macros::datetime;

    fn page_count(bytes: &[u8]) -> usize {
        lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
    }

    fn first_page_text(bytes: &[u8]) -> String {
        lopdf::Document::load_mem(bytes).unwrap().extract_text(&[1]).unwrap()
    }

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult::new(Source::Url("https://www.example.com/page".into()));
        result.title = "Example – “Quoted” title".into();
        result.text = "Body text ".repeat(100);
        result.word_count = 200;
        result.readability = 71.234;
        result.top_keywords_freq = vec![("body".into(), 100), ("text".into(), 100)];
        result.top_keywords_tfidf = vec![("body".into(), 0.7071), ("text".into(), 0.7071)];
        result.noun_phrases = vec!["body text".into()];
        result.recommendations = vec!["Increase word count to at least 300 for SEO effectiveness.".into()];
        result
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = ReportRenderer::default().render_at(&sample(), datetime!(2025-06-24 12:00 UTC)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(page_count(&bytes) >= 1);
    }

    #[test]
    fn test_one_page_per_section() {
        let mut result = sample();
        let base_pages = page_count(&ReportRenderer::default().render(&result).unwrap());

        result.sections = (1..=3)
            .map(|i| SectionResult {
                label: format!("Tab {}", i),
                word_count: 25,
                readability: 60.0,
                top_keywords: vec![("pricing".into(), 3)],
                tfidf_keywords: vec![("pricing".into(), 1.0)],
                noun_phrases: vec!["monthly plan".into(), "annual plan".into()],
            })
            .collect();

        let with_sections = page_count(&ReportRenderer::default().render(&result).unwrap());
        assert_eq!(with_sections, base_pages + 3);
    }

    #[test]
    fn test_error_result_still_renders() {
        let result = AnalysisResult::fetch_failed(Source::Url("https://unreachable.invalid".into()));
        let bytes = ReportRenderer::default().render(&result).unwrap();
        assert!(page_count(&bytes) >= 1);
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.pdf");
        ReportRenderer::default().render_to_file(&sample(), &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn test_preview_follows_configured_length() {
        let mut result = AnalysisResult::new(Source::DirectText);
        result.text = format!("{}TAILMARKER", "alpha ".repeat(10));

        let thresholds = Thresholds { preview_chars: 20, ..Thresholds::default() };
        let short = ReportRenderer::new(RenderConfig::from(&thresholds)).render(&result).unwrap();
        assert!(!first_page_text(&short).contains("TAILMARKER"));

        let full = ReportRenderer::default().render(&result).unwrap();
        assert!(first_page_text(&full).contains("TAILMARKER"));
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        assert!(text_width("Readability", Font::Bold, 12.0) > text_width("Readability", Font::Regular, 12.0));
        assert_eq!(text_width("ll", Font::Italic, 10.0), text_width("ll", Font::Regular, 10.0));
        assert_eq!(char_width('m', Font::Bold, 1000.0), 889.0);
    }

    #[test]
    fn test_wrap_fits_width() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, Font::Regular, 11.0, 300.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, Font::Regular, 11.0) <= 300.0));

        let unbroken = "W".repeat(80);
        let lines = wrap(&unbroken, Font::Bold, 12.0, 200.0);
        assert!(lines.iter().all(|l| text_width(l, Font::Bold, 12.0) <= 200.0));
        assert_eq!(lines.concat(), unbroken);
    }

    #[test]
    fn test_wrap_keeps_line_breaks() {
        assert_eq!(wrap("one\ntwo", Font::Regular, 11.0, 500.0), vec!["one", "two"]);
    }
}
