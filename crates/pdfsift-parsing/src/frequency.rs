use std::collections::HashMap;

/// One ranked word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Lowercase a token and keep only ASCII letters and digits.
pub fn clean_word(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Rank cleaned words of at least `min_len` characters by descending count.
///
/// Ties keep the order in which the words were first seen.
pub fn top_words<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
    min_len: usize,
    limit: usize,
) -> Vec<WordCount> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for token in tokens {
        let word = clean_word(token);
        if word.len() < min_len {
            continue;
        }
        match slots.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                slots.insert(word.clone(), counts.len());
                counts.push(WordCount { word, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_punctuation_and_case() {
        assert_eq!(clean_word("Hello,"), "hello");
        assert_eq!(clean_word("(e-mail)"), "email");
        assert_eq!(clean_word("café"), "caf");
    }

    #[test]
    fn ranks_by_count_then_first_seen() {
        let text = "delta alpha beta alpha gamma delta alpha";
        let ranked = top_words(text.split_whitespace(), 4, 10);
        let words: Vec<(&str, usize)> = ranked.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(
            words,
            vec![("alpha", 3), ("delta", 2), ("beta", 1), ("gamma", 1)]
        );
    }

    #[test]
    fn short_words_are_skipped() {
        let ranked = top_words("the cat and the dog".split_whitespace(), 4, 10);
        assert!(ranked.is_empty());
    }

    #[test]
    fn merges_after_cleaning() {
        let ranked = top_words("Report report. REPORT!".split_whitespace(), 4, 10);
        assert_eq!(
            ranked,
            vec![WordCount {
                word: "report".into(),
                count: 3
            }]
        );
    }

    #[test]
    fn truncates_to_limit() {
        let text = "aaaa bbbb cccc dddd";
        let ranked = top_words(text.split_whitespace(), 4, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].word, "aaaa");
        assert_eq!(ranked[1].word, "bbbb");
    }
}
