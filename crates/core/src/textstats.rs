//! Word, sentence and syllable counts plus Flesch Reading Ease.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+(\s|$)").unwrap());

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Tokens that contain at least one letter or digit.
fn lexicon(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter(|w| w.chars().any(char::is_alphanumeric))
}

/// Number of sentences, never less than one for non-empty text.
pub fn sentence_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    let ends = SENTENCE_END_RE.find_iter(trimmed).count();
    let trailing = !trimmed.ends_with(['.', '!', '?']);
    (ends + usize::from(trailing)).max(1)
}

/// Heuristic English syllable count for a single word.
///
/// Counts vowel groups, drops a silent final `e` (but not `-le` after a
/// consonant), and never returns less than one for a word with letters.
pub fn syllable_count(word: &str) -> usize {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).flat_map(char::to_lowercase).collect();
    if letters.is_empty() {
        return 0;
    }
    if letters.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    if letters[n - 1] == 'e' && groups > 1 {
        let consonant_le = letters[n - 2] == 'l' && !is_vowel(letters[n - 3]);
        if !consonant_le {
            groups -= 1;
        }
    }

    groups.max(1)
}

/// Flesch Reading Ease, rounded to two decimals.
///
/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
/// Returns `None` when the text has no words.
pub fn flesch_reading_ease(text: &str) -> Option<f64> {
    let words: Vec<&str> = lexicon(text).collect();
    if words.is_empty() {
        return None;
    }

    let word_total = words.len() as f64;
    let sentences = sentence_count(text).max(1) as f64;
    let syllables = words.iter().map(|w| syllable_count(w)).sum::<usize>() as f64;

    let score = 206.835 - 1.015 * (word_total / sentences) - 84.6 * (syllables / word_total);
    Some((score * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_word_count_is_whitespace_split() {
        assert_eq!(word_count("Short test."), 2);
        assert_eq!(word_count("  spaced \n\t out  words "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("-- — !!"), 3);
    }

    #[rstest]
    #[case("the", 1)]
    #[case("cat", 1)]
    #[case("make", 1)]
    #[case("table", 2)]
    #[case("readability", 5)]
    #[case("beautiful", 3)]
    #[case("simple", 2)]
    #[case("1234", 0)]
    fn test_syllable_count(#[case] word: &str, #[case] expected: usize) {
        assert_eq!(syllable_count(word), expected);
    }

    #[test]
    fn test_sentence_count() {
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("No terminal punctuation"), 1);
        assert_eq!(sentence_count("Version 1.5 is out. Really"), 2);
        assert_eq!(sentence_count("   "), 0);
    }

    #[test]
    fn test_flesch_short_text() {
        let score = flesch_reading_ease("Short test.").unwrap();
        assert!((score - 120.2).abs() < 0.02);
    }

    #[test]
    fn test_flesch_harder_text_scores_lower() {
        let easy = flesch_reading_ease("The cat sat on the mat. The dog ran.").unwrap();
        let hard = flesch_reading_ease(
            "Comprehensive organizational restructuring necessitates considerable interdepartmental coordination.",
        )
        .unwrap();
        assert!(easy > hard);
        assert!(hard < 0.0);
    }

    #[test]
    fn test_flesch_empty_is_none() {
        assert_eq!(flesch_reading_ease(""), None);
        assert_eq!(flesch_reading_ease("  -- ... "), None);
    }
}
