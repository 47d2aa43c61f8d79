use crate::parse::Element;
use once_cell::sync::Lazy;
use regex::Regex;

/// Configuration for main-content candidate scoring
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum content density score from character count
    pub max_char_density_score: f64,
    /// Maximum content density score from comma count
    pub max_comma_density_score: f64,
    /// Characters per point for content density scoring
    pub chars_per_point: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            max_char_density_score: 3.0,
            max_comma_density_score: 3.0,
            chars_per_point: 100,
        }
    }
}

/// Breakdown of a candidate's score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub base_score: f64,
    pub class_weight: f64,
    pub content_density: f64,
    /// Link density (0.0 to 1.0)
    pub link_density: f64,
    pub final_score: f64,
}

/// Base score by tag:
/// - ARTICLE: +10, SECTION/MAIN: +8, DIV: +5
/// - TD, BLOCKQUOTE: +3
/// - FORM, lists: -3
/// - headings, TH, HEADER, FOOTER, NAV, ASIDE: -5
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" | "main" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" | "aside" => -5.0,
        _ => 0.0,
    }
}

static POSITIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)").unwrap()
});

static NEGATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|cookie|share|social)",
    )
    .unwrap()
});

/// Class/ID weight: positive patterns win over negative ones on the same token.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let tokens = element
        .attr("id")
        .into_iter()
        .chain(element.attr("class").into_iter().flat_map(str::split_whitespace));

    for token in tokens {
        if POSITIVE_RE.is_match(token) {
            return config.positive_weight;
        }
        if NEGATIVE_RE.is_match(token) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Content density from visible text length and comma count.
pub fn content_density_score(text: &str, config: &ScoreConfig) -> f64 {
    let char_score = ((text.chars().count() / config.chars_per_point) as f64).min(config.max_char_density_score);
    let comma_score = (text.matches(',').count() as f64).min(config.max_comma_density_score);

    char_score + comma_score
}

/// Ratio of link text to all text, 0.0 for empty elements.
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.visible_text(" ").chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let link_length = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.visible_text(" ").chars().count())
        .sum::<usize>();

    (link_length as f64 / text_length as f64).min(1.0)
}

/// Final score: `(base + class weight + density) * (1 - link density)`.
///
/// The link penalty is halved for elements with a positive class/ID or
/// more than 500 characters of text.
pub fn calculate_score(element: &Element<'_>, config: &ScoreConfig) -> ScoreResult {
    let text = element.visible_text(" ");
    let base_score = base_tag_score(element);
    let class_weight = class_id_weight(element, config);
    let content_density = content_density_score(&text, config);
    let ld = link_density(element);

    let lenient = class_weight > 0.0 || text.chars().count() > 500;
    let link_penalty = if lenient { 1.0 - ld * 0.5 } else { 1.0 - ld };
    let final_score = (base_score + class_weight + content_density) * link_penalty;

    ScoreResult { base_score, class_weight, content_density, link_density: ld, final_score }
}
