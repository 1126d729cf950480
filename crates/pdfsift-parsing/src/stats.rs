use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static PARAGRAPH_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Counts over the whole recovered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub unique_words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

impl TextStats {
    pub fn compute(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let unique_words = words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        Self {
            characters: text.chars().count(),
            words: words.len(),
            unique_words,
            sentences: count_fragments(&SENTENCE_END_RE, text, 5),
            paragraphs: count_fragments(&PARAGRAPH_BREAK_RE, text, 10),
        }
    }

    /// Words per paragraph, rounded; a text without paragraphs counts as one.
    pub fn text_density(&self) -> u64 {
        (self.words as f64 / self.paragraphs.max(1) as f64).round() as u64
    }
}

/// Number of `sep`-delimited fragments whose trimmed length exceeds `min_len`.
fn count_fragments(sep: &Regex, text: &str, min_len: usize) -> usize {
    sep.split(text)
        .filter(|fragment| fragment.trim().chars().count() > min_len)
        .count()
}
