use once_cell::sync::Lazy;
use regex::Regex;

/// Whitespace characters as the recovery passes see them.
///
/// The byte view is Latin-1, so only U+0000..=U+00FF can occur; within that
/// range this is the complete set, including NBSP (0xA0) but not NEL (0x85).
pub(crate) const WS_CLASS: &str = r"\t\n\x0B\x0C\r \u{A0}";

pub(crate) fn is_space(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' ' | '\u{A0}')
}

/// Decode bytes one-to-one into chars (Latin-1), so no byte value is lost.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("[{WS_CLASS}]+")).unwrap());
    WS_RUN
        .replace_all(text, " ")
        .trim_matches(is_space)
        .to_string()
}

/// Keep printable ASCII plus newline, carriage return and tab.
pub fn strip_non_printable(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\n' | '\r' | '\t' | ' '..='~'))
        .collect()
}

/// Final cleanup applied to the joined heuristic output.
pub fn clean_recovered(joined: &str) -> String {
    let collapsed = collapse_whitespace(joined);
    collapse_whitespace(&strip_non_printable(&collapsed))
}
