//! Noun-phrase chunking.
//!
//! A small rule-based tagger assigns a coarse part of speech to each token
//! from closed-class word lists and suffix rules. A chunk is an optional
//! determiner followed by adjectives, numbers and nouns, ending at a noun.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'\-]*|\d+(?:[.,]\d+)*|[^\sA-Za-z\d]").unwrap());

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our", "their", "some",
    "any", "each", "every", "no", "all", "both", "another", "such", "what", "which", "whose", "many", "much", "few",
    "several", "more", "most", "other",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself", "himself",
    "herself", "itself", "ourselves", "themselves", "who", "whom", "something", "anything", "nothing", "everything",
    "someone", "anyone", "everyone", "nobody", "mine", "yours", "hers", "ours", "theirs", "there", "here",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "to", "from", "up", "down", "out", "off", "over", "under", "again", "around",
    "across", "along", "among", "behind", "beside", "beyond", "near", "onto", "toward", "towards", "upon", "within",
    "without", "via", "per", "like", "than", "as",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "although", "though", "while", "whereas", "unless",
    "until", "since", "when", "where", "whether", "how", "why", "then", "once",
];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have", "has", "had", "having",
    "will", "would", "shall", "should", "can", "could", "may", "might", "must", "not", "don't", "doesn't", "didn't",
    "isn't", "aren't", "wasn't", "weren't", "won't", "can't", "it's", "that's",
];

const VERBS: &[&str] = &[
    "add", "allow", "ask", "become", "begin", "bring", "build", "buy", "call", "change", "choose", "come", "contain",
    "create", "deliver", "describe", "feel", "find", "follow", "get", "give", "go", "grow", "help", "hold", "improve",
    "include", "increase", "jump", "keep", "know", "lead", "learn", "leave", "let", "live", "look", "lose", "love",
    "make", "mean", "meet", "move", "need", "offer", "open", "pay", "play", "provide", "put", "reach", "read",
    "remain", "run", "say", "see", "seem", "sell", "send", "set", "show", "sit", "speak", "spend", "stand", "start",
    "stay", "support", "take", "talk", "tell", "think", "try", "turn", "understand", "use", "want", "watch", "win",
    "work", "write", "went", "made", "said", "took", "gave", "found", "thought", "told", "became", "left", "felt",
    "brought", "began", "kept", "held", "wrote", "stood", "ran", "sat", "got", "knew", "came", "saw", "built", "sold",
    "offers", "provides", "makes",
];

const ADVERBS: &[&str] = &[
    "very", "also", "just", "only", "even", "still", "already", "always", "never", "often", "sometimes", "soon",
    "now", "too", "quite", "rather", "almost", "really", "well", "however", "therefore", "perhaps", "not", "ever",
];

const ADJECTIVES: &[&str] = &[
    "good", "new", "first", "last", "long", "great", "little", "own", "old", "right", "big", "high", "different",
    "small", "large", "next", "early", "young", "important", "public", "bad", "same", "able", "best", "better",
    "free", "full", "easy", "hard", "clear", "quick", "brown", "lazy", "red", "blue", "green", "black", "white",
    "fast", "slow", "simple", "main", "real", "local", "top", "key", "low", "strong", "short", "whole", "modern",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "less", "able", "ible", "ical", "ish", "ary", "ic"];

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Auxiliary,
    Verb,
    Adverb,
    Adjective,
    Noun,
    Number,
    Punctuation,
}

/// Word lists backing the tagger.
///
/// Built once and owned by the [`crate::TextScorer`] that uses it.
#[derive(Debug, Clone)]
pub struct Lexicon {
    determiners: HashSet<&'static str>,
    pronouns: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
    conjunctions: HashSet<&'static str>,
    auxiliaries: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    /// The built-in English word lists.
    pub fn english() -> Self {
        let set = |words: &[&'static str]| words.iter().copied().collect::<HashSet<_>>();
        Self {
            determiners: set(DETERMINERS),
            pronouns: set(PRONOUNS),
            prepositions: set(PREPOSITIONS),
            conjunctions: set(CONJUNCTIONS),
            auxiliaries: set(AUXILIARIES),
            verbs: set(VERBS),
            adverbs: set(ADVERBS),
            adjectives: set(ADJECTIVES),
        }
    }

    /// Tags a single token given the tag of the token before it.
    pub fn tag(&self, token: &str, previous: Option<Tag>) -> Tag {
        let first = token.chars().next().unwrap_or(' ');
        if first.is_ascii_digit() {
            return Tag::Number;
        }
        if !first.is_alphabetic() {
            return Tag::Punctuation;
        }

        let word = token.to_lowercase();
        let w = word.as_str();

        if self.determiners.contains(w) {
            return Tag::Determiner;
        }
        if self.pronouns.contains(w) {
            return Tag::Pronoun;
        }
        if self.auxiliaries.contains(w) {
            return Tag::Auxiliary;
        }
        if self.prepositions.contains(w) {
            return Tag::Preposition;
        }
        if self.conjunctions.contains(w) {
            return Tag::Conjunction;
        }
        if self.adverbs.contains(w) {
            return Tag::Adverb;
        }
        if self.adjectives.contains(w) {
            return Tag::Adjective;
        }
        if self.is_verb_form(w) {
            return Tag::Verb;
        }

        let after_modifier = matches!(previous, Some(Tag::Determiner | Tag::Adjective));
        if w.len() > 4 && w.ends_with("ly") {
            return Tag::Adverb;
        }
        if w.len() > 4 && (w.ends_with("ed") || w.ends_with("ing")) {
            return if after_modifier { Tag::Adjective } else { Tag::Verb };
        }
        if w.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| w.ends_with(suffix)) {
            return Tag::Adjective;
        }

        Tag::Noun
    }

    fn is_verb_form(&self, word: &str) -> bool {
        if self.verbs.contains(word) {
            return true;
        }
        word.strip_suffix('s').is_some_and(|stem| self.verbs.contains(stem))
            || word.strip_suffix("es").is_some_and(|stem| self.verbs.contains(stem))
    }
}

/// Extracts noun chunks from free text.
#[derive(Debug, Clone, Default)]
pub struct PhraseChunker {
    lexicon: Lexicon,
}

impl PhraseChunker {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tokens of `text` with their tags.
    pub fn tag<'t>(&self, text: &'t str) -> Vec<(&'t str, Tag)> {
        let mut tagged = Vec::new();
        let mut previous = None;
        for m in TOKEN_RE.find_iter(text) {
            let tag = self.lexicon.tag(m.as_str(), previous);
            tagged.push((m.as_str(), tag));
            previous = Some(tag);
        }
        tagged
    }

    /// Every noun chunk, in document order, exactly as written.
    pub fn chunks(&self, text: &str) -> Vec<String> {
        let tagged = self.tag(text);
        let mut chunks = Vec::new();
        let mut i = 0;

        while i < tagged.len() {
            let start = i;
            if tagged[i].1 == Tag::Determiner {
                i += 1;
            }
            let mut last_noun = None;
            while i < tagged.len() && matches!(tagged[i].1, Tag::Adjective | Tag::Noun | Tag::Number) {
                if tagged[i].1 == Tag::Noun {
                    last_noun = Some(i);
                }
                i += 1;
            }

            match last_noun {
                Some(end) => {
                    let words: Vec<&str> = tagged[start..=end].iter().map(|(token, _)| *token).collect();
                    chunks.push(words.join(" "));
                    i = end + 1;
                }
                None => i = start + 1,
            }
        }

        chunks
    }

    /// Lower-cased, de-duplicated chunks of more than one word and more than
    /// four characters, at most `top_n` of them.
    pub fn noun_phrases(&self, text: &str, top_n: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        self.chunks(text)
            .into_iter()
            .map(|chunk| chunk.to_lowercase().trim().to_string())
            .filter(|phrase| phrase.split_whitespace().count() > 1 && phrase.chars().count() > 4)
            .filter(|phrase| seen.insert(phrase.clone()))
            .take(top_n)
            .collect()
    }
}
