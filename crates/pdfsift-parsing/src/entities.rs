//! Whole-text entity scanning.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use pdfsift_core::EntityKind;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap()
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}(?-u:\b)").unwrap()
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(?:[0-9]{1,2}[-/][0-9]{1,2}[-/][0-9]{2,4}|[0-9]{4}[-/][0-9]{1,2}[-/][0-9]{1,2})(?-u:\b)",
    )
    .unwrap()
});

static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[0-9,]+\.?[0-9]*").unwrap());

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{1,10}(?:,[0-9]{3})*(?:\.[0-9]{1,4})?(?-u:\b)").unwrap()
});

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u:https?://)[^\s]+").unwrap());

static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9]{5}(?:-[0-9]{4})?(?-u:\b)").unwrap());

/// The regex used for an entity kind.
pub fn pattern(kind: EntityKind) -> &'static Regex {
    match kind {
        EntityKind::Email => &EMAIL_RE,
        EntityKind::Phone => &PHONE_RE,
        EntityKind::Date => &DATE_RE,
        EntityKind::Currency => &CURRENCY_RE,
        EntityKind::Number => &NUMBER_RE,
        EntityKind::Url => &URL_RE,
        EntityKind::PostalCode => &POSTAL_CODE_RE,
    }
}

/// Every match of `kind` in `text`, duplicates included, in text order.
pub fn find_all(text: &str, kind: EntityKind) -> Vec<&str> {
    pattern(kind).find_iter(text).map(|m| m.as_str()).collect()
}

/// Drop repeated values, keeping first occurrences, then truncate.
pub fn dedup_first_seen<'a>(values: &[&'a str], limit: usize) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .copied()
        .filter(|v| seen.insert(*v))
        .take(limit)
        .collect()
}

/// Raw matches for the entity kinds that feed the pattern analysis.
#[derive(Debug, Clone, Default)]
pub struct EntityScan<'a> {
    pub emails: Vec<&'a str>,
    pub phones: Vec<&'a str>,
    pub dates: Vec<&'a str>,
    pub currency_values: Vec<&'a str>,
    pub urls: Vec<&'a str>,
    pub postal_codes: Vec<&'a str>,
}

impl<'a> EntityScan<'a> {
    pub fn scan(text: &'a str) -> Self {
        let scan = Self {
            emails: find_all(text, EntityKind::Email),
            phones: find_all(text, EntityKind::Phone),
            dates: find_all(text, EntityKind::Date),
            currency_values: find_all(text, EntityKind::Currency),
            urls: find_all(text, EntityKind::Url),
            postal_codes: find_all(text, EntityKind::PostalCode),
        };
        tracing::debug!(
            emails = scan.emails.len(),
            phones = scan.phones.len(),
            dates = scan.dates.len(),
            "entity scan complete"
        );
        scan
    }

    /// Kinds emitted as individual records, in output order.
    pub fn listed(&self) -> [(EntityKind, &[&'a str]); 3] {
        [
            (EntityKind::Email, self.emails.as_slice()),
            (EntityKind::Phone, self.phones.as_slice()),
            (EntityKind::Date, self.dates.as_slice()),
        ]
    }
}
