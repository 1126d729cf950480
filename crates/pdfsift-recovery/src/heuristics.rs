//! The three independent text recovery passes.
//!
//! Each pass takes the Latin-1 view of the whole file and returns its
//! fragments, each followed by a single space. Passes do not share state and
//! their outputs may overlap.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::WS_CLASS;

/// Non-greedy `(...)` on a single line; the body may itself contain `(`.
static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^\n\r]*?)\)").unwrap());

/// Pass 1: literal strings painted by show-text operators inside `BT ... ET`.
pub fn text_show_blocks(content: &str) -> String {
    static TEXT_OBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)BT(.*?)ET").unwrap());
    static SHOW_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(r"\([^\n\r]*?\)[{WS_CLASS}]*(?:Tj|TJ|')")).unwrap()
    });
    static ARRAY_SHOW_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(&format!(r"\[[^\n\r]*?\][{WS_CLASS}]*TJ")).unwrap());

    let mut out = String::new();
    for object in TEXT_OBJECT_RE.find_iter(content) {
        let object = object.as_str();

        for cmd in SHOW_RE.find_iter(object) {
            if let Some(text) = PAREN_RE
                .captures(cmd.as_str())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .filter(|t| !t.is_empty())
            {
                out.push_str(text);
                out.push(' ');
            }
        }

        for cmd in ARRAY_SHOW_RE.find_iter(object) {
            for piece in PAREN_RE.find_iter(cmd.as_str()) {
                out.push_str(&strip_parens(piece.as_str()));
                out.push(' ');
            }
        }
    }
    out
}

/// Pass 2: readable runs left in raw (unfiltered) stream payloads.
pub fn stream_bodies(content: &str) -> String {
    static STREAM_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(r"(?s)stream[{WS_CLASS}]*(.*?)[{WS_CLASS}]*endstream")).unwrap()
    });
    static READABLE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r#"[A-Za-z0-9{WS_CLASS}.,;:!?'"@#$%&*()_+=\-\[\]{{}}|\\`~<>/]{{4,}}"#
        ))
        .unwrap()
    });

    let mut out = String::new();
    for caps in STREAM_RE.captures_iter(content) {
        let Some(body) = caps.get(1) else { continue };
        for run in READABLE_RUN_RE.find_iter(body.as_str()) {
            let run = run.as_str();
            if run.trim().chars().count() > 3 && run.chars().any(|c| c.is_ascii_alphabetic()) {
                out.push_str(run);
                out.push(' ');
            }
        }
    }
    out
}

/// Pass 3: any parenthesized string anywhere in the file.
pub fn bare_strings(content: &str) -> String {
    let mut out = String::new();
    for piece in PAREN_RE.find_iter(content) {
        let text = strip_parens(piece.as_str());
        if text.chars().count() > 1 && text.chars().any(|c| c.is_ascii_alphanumeric()) {
            out.push_str(&text);
            out.push(' ');
        }
    }
    out
}

fn strip_parens(s: &str) -> String {
    s.replace(['(', ')'], "")
}
