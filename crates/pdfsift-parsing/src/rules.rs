//! Ordered key-value rule table.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named `key <sep> value` line pattern with two capture groups.
#[derive(Debug, Clone)]
pub struct KeyValueRule {
    name: String,
    regex: Regex,
}

impl KeyValueRule {
    pub fn new(name: impl Into<String>, regex: Regex) -> Self {
        Self {
            name: name.into(),
            regex,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the rule to a single trimmed line.
    ///
    /// Accepts the match only when the trimmed key is longer than one
    /// character, the trimmed value is non-empty, and the two differ.
    pub fn apply<'a>(&self, line: &'a str) -> Option<KeyValue<'a>> {
        let caps = self.regex.captures(line)?;
        let key = caps.get(1)?.as_str().trim();
        let value = caps.get(2)?.as_str().trim();
        (key.chars().count() > 1 && !value.is_empty() && key != value).then_some(KeyValue {
            key,
            value,
        })
    }
}

/// A field recognized on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValue<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Built-in rules in priority order: `label: value`, `label - value` /
/// `label = value`, then `label value`.
pub static DEFAULT_KEY_VALUE_RULES: Lazy<Vec<KeyValueRule>> = Lazy::new(|| {
    vec![
        KeyValueRule::new(
            "colon",
            Regex::new(r"^([A-Za-z\s]{2,40}):\s*(.{1,200})$").unwrap(),
        ),
        KeyValueRule::new(
            "dash-or-equals",
            Regex::new(r"^([A-Za-z\s]{2,40})\s*[-=]\s*(.{1,200})$").unwrap(),
        ),
        KeyValueRule::new(
            "whitespace",
            Regex::new(r"^([A-Za-z\s]{2,40})\s+([A-Za-z0-9@.,\s$%#]{2,100})$").unwrap(),
        ),
    ]
});

/// Try each rule in order; the first acceptable match wins.
pub fn match_key_value<'a>(line: &'a str, rules: &[KeyValueRule]) -> Option<KeyValue<'a>> {
    rules.iter().find_map(|rule| rule.apply(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(line: &str) -> Option<(String, String)> {
        match_key_value(line, &DEFAULT_KEY_VALUE_RULES).map(|kv| (kv.key.into(), kv.value.into()))
    }

    #[test]
    fn colon_rule() {
        assert_eq!(
            first("Invoice Number: 10042"),
            Some(("Invoice Number".into(), "10042".into()))
        );
    }

    #[test]
    fn dash_and_equals_rules() {
        assert_eq!(
            first("Status - Paid in full"),
            Some(("Status".into(), "Paid in full".into()))
        );
        assert_eq!(first("Total = 42"), Some(("Total".into(), "42".into())));
    }

    #[test]
    fn whitespace_rule() {
        assert_eq!(
            first("Department Finance"),
            Some(("Department".into(), "Finance".into()))
        );
    }

    #[test]
    fn colon_beats_later_rules() {
        // The dash rule would split at the hyphen; the colon rule is tried first.
        assert_eq!(
            first("Phone: 555-123-4567"),
            Some(("Phone".into(), "555-123-4567".into()))
        );
    }

    #[test]
    fn one_letter_key_is_rejected() {
        assert_eq!(first("x: 12"), None);
    }

    #[test]
    fn label_with_digits_does_not_match() {
        assert_eq!(first("Room 101: Lab"), None);
    }

    #[test]
    fn identical_key_and_value_are_rejected() {
        // Every rule either fails or yields key == value here.
        assert_eq!(first("ab - ab"), None);
    }

    #[test]
    fn overlong_label_does_not_match() {
        let label = "a".repeat(41);
        assert_eq!(first(&format!("{label}: value")), None);
    }
}
