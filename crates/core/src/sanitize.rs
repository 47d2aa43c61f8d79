//! Text clean-up before PDF layout.
//!
//! Core PDF fonts only know a single-byte character set, so symbols and
//! typographic punctuation are replaced with ASCII stand-ins, invisible
//! characters are dropped, and very long unbroken runs get split so line
//! wrapping can place them. [`sanitize`] is idempotent.

/// Longest run of non-whitespace characters left intact.
pub const MAX_UNBROKEN_RUN: usize = 50;

const REPLACEMENTS: &[(&str, &str)] = &[
    ("❌", "[NOT FOUND]"),
    ("⚠️", "[WARNING]"),
    ("⚠", "[WARNING]"),
    ("✅", "[OK]"),
    ("–", "-"),
    ("—", "-"),
    ("…", "..."),
    ("“", "\""),
    ("”", "\""),
    ("‘", "'"),
    ("’", "'"),
    ("•", "-"),
    ("\u{a0}", " "),
];

/// Zero-width and other format characters that render as nothing or garbage.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{ad}' | '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}'
            | '\u{fe0e}' | '\u{fe0f}'
    )
}

/// Makes `text` safe for the report renderer.
///
/// Line breaks survive; tabs and carriage returns become spaces; every
/// other control or invisible character is removed.
pub fn sanitize(text: &str) -> String {
    let mut replaced = text.to_string();
    for (from, to) in REPLACEMENTS {
        if replaced.contains(from) {
            replaced = replaced.replace(from, to);
        }
    }

    let cleaned: String = replaced
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' | '\r' => Some(' '),
            c if c.is_control() || is_invisible(c) => None,
            c => Some(c),
        })
        .collect();

    break_long_runs(&cleaned, MAX_UNBROKEN_RUN)
}

/// Inserts a space after every `max` characters of an unbroken run.
fn break_long_runs(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c.is_whitespace() {
            run = 0;
        } else {
            if run == max {
                out.push(' ');
                run = 0;
            }
            run += 1;
        }
        out.push(c);
    }
    out
}
