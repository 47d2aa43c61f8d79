//! Keyword extraction: raw frequency and single-document TF-IDF.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static FREQ_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").unwrap());
static TFIDF_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Common English stop words, dropped before TF-IDF weighting.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co",
    "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for",
    "former", "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go", "had",
    "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
    "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move",
    "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no",
    "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one",
    "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow",
    "someone", "something", "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two",
    "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever",
    "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Whether `word` (lower-case) is an English stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Counts of lower-cased alphabetic tokens of three or more letters.
///
/// Returns at most `top_n` entries by descending count; ties keep the order
/// in which the words first appeared.
pub fn top_frequency_keywords(text: &str, top_n: usize) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for m in FREQ_TOKEN_RE.find_iter(&lowered) {
        let count = counts.entry(m.as_str()).or_insert(0);
        if *count == 0 {
            order.push(m.as_str());
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order.into_iter().map(|w| (w.to_string(), counts[w])).collect();
    // stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

/// Configuration for TF-IDF weighting.
#[derive(Debug, Clone)]
pub struct TfidfConfig {
    /// Vocabulary cap: only the most frequent terms are weighted.
    pub max_features: usize,
    /// Drop English stop words before counting.
    pub remove_stop_words: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self { max_features: 1000, remove_stop_words: true }
    }
}

/// Top `top_n` terms of a single document by TF-IDF weight.
///
/// With one document the smoothed idf is `ln(2/2) + 1 = 1` for every term,
/// so weights are raw term counts scaled to unit L2 norm. Terms with equal
/// weight come out alphabetically.
pub fn top_tfidf_keywords(text: &str, top_n: usize, config: &TfidfConfig) -> Vec<(String, f64)> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for m in TFIDF_TOKEN_RE.find_iter(&lowered) {
        let term = m.as_str();
        if config.remove_stop_words && is_stop_word(term) {
            continue;
        }
        *counts.entry(term).or_insert(0) += 1;
    }

    if counts.is_empty() {
        return Vec::new();
    }

    let mut vocabulary: Vec<(&str, usize)> = counts.into_iter().collect();
    vocabulary.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    vocabulary.truncate(config.max_features);

    let norm = vocabulary.iter().map(|(_, c)| (*c as f64).powi(2)).sum::<f64>().sqrt();

    vocabulary
        .into_iter()
        .take(top_n)
        .map(|(term, count)| (term.to_string(), count as f64 / norm))
        .collect()
}
