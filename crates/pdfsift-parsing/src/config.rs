use regex::Regex;
use thiserror::Error;

use pdfsift_core::config_file::InferenceSection;

use crate::rules::KeyValueRule;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("key-value pattern `{0}` needs two capture groups (key, value)")]
    MissingGroups(String),
    #[error("table column range {min}..={max} is empty")]
    EmptyColumnRange { min: usize, max: usize },
    #[error("min_record_fields must be at least {min}, got {got}")]
    TooFewRecordFields { got: usize, min: usize },
}

/// Smallest field count a key-value record may be flushed with.
const MIN_RECORD_FIELDS_FLOOR: usize = 2;

/// Configuration for the record inference pipeline.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Key-value rules, tried in order; first acceptable match wins.
    pub(crate) key_value_rules: ListOverride<KeyValueRule>,
    /// A key-value record is flushed only once it holds this many fields (default: 2).
    pub(crate) min_record_fields: usize,
    /// Column count a split line must fall within to become a table row (default: 3..=8).
    pub(crate) min_table_columns: usize,
    pub(crate) max_table_columns: usize,
    /// Deduplicated emails/phones/dates emitted per kind (default: 10).
    pub(crate) max_entities_per_kind: usize,
    /// Structured records emitted (default: 50).
    pub(crate) max_structured_records: usize,
    /// Ranked words in the frequency fallback (default: 20).
    pub(crate) top_words: usize,
    /// Cleaned words shorter than this are not counted (default: 4).
    pub(crate) min_word_length: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            key_value_rules: ListOverride::Default,
            min_record_fields: 2,
            min_table_columns: 3,
            max_table_columns: 8,
            max_entities_per_kind: 10,
            max_structured_records: 50,
            top_words: 20,
            min_word_length: 4,
        }
    }
}

impl InferenceConfig {
    /// The effective key-value rule table.
    pub fn key_value_rules(&self) -> Vec<KeyValueRule> {
        self.key_value_rules.resolve(&crate::rules::DEFAULT_KEY_VALUE_RULES)
    }

    pub fn min_record_fields(&self) -> usize {
        self.min_record_fields
    }

    pub fn table_columns(&self) -> std::ops::RangeInclusive<usize> {
        self.min_table_columns..=self.max_table_columns
    }

    pub fn max_entities_per_kind(&self) -> usize {
        self.max_entities_per_kind
    }

    pub fn max_structured_records(&self) -> usize {
        self.max_structured_records
    }

    pub fn top_words(&self) -> usize {
        self.top_words
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }
}

/// Builder for [`InferenceConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct InferenceConfigBuilder {
    key_value_rules: ListOverride<(String, String)>,
    min_record_fields: Option<usize>,
    min_table_columns: Option<usize>,
    max_table_columns: Option<usize>,
    max_entities_per_kind: Option<usize>,
    max_structured_records: Option<usize>,
    top_words: Option<usize>,
    min_word_length: Option<usize>,
}

impl InferenceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed scalar settings from the `[inference]` section of a config file.
    pub fn from_section(section: &InferenceSection) -> Self {
        Self {
            min_record_fields: section.min_record_fields,
            min_table_columns: section.min_table_columns,
            max_table_columns: section.max_table_columns,
            max_entities_per_kind: section.max_entities_per_kind,
            max_structured_records: section.max_structured_records,
            top_words: section.top_words,
            min_word_length: section.min_word_length,
            ..Self::default()
        }
    }

    // ── Key-value rules ──

    /// Replace the built-in key-value rules. Each pattern needs two capture groups.
    pub fn set_key_value_rules(mut self, rules: Vec<(String, String)>) -> Self {
        self.key_value_rules = ListOverride::Replace(rules);
        self
    }

    /// Append a rule tried after the built-in ones.
    pub fn add_key_value_rule(mut self, name: &str, pattern: &str) -> Self {
        let rule = (name.to_string(), pattern.to_string());
        match &mut self.key_value_rules {
            ListOverride::Extend(v) => v.push(rule),
            _ => self.key_value_rules = ListOverride::Extend(vec![rule]),
        }
        self
    }

    // ── Scalars ──

    pub fn min_record_fields(mut self, n: usize) -> Self {
        self.min_record_fields = Some(n);
        self
    }

    pub fn table_columns(mut self, min: usize, max: usize) -> Self {
        self.min_table_columns = Some(min);
        self.max_table_columns = Some(max);
        self
    }

    pub fn max_entities_per_kind(mut self, n: usize) -> Self {
        self.max_entities_per_kind = Some(n);
        self
    }

    pub fn max_structured_records(mut self, n: usize) -> Self {
        self.max_structured_records = Some(n);
        self
    }

    pub fn top_words(mut self, n: usize) -> Self {
        self.top_words = Some(n);
        self
    }

    pub fn min_word_length(mut self, n: usize) -> Self {
        self.min_word_length = Some(n);
        self
    }

    /// Compile all patterns and produce an [`InferenceConfig`].
    pub fn build(self) -> Result<InferenceConfig, ConfigError> {
        let compile = |rules: Vec<(String, String)>| -> Result<Vec<KeyValueRule>, ConfigError> {
            rules
                .into_iter()
                .map(|(name, pattern)| {
                    let regex = Regex::new(&pattern)?;
                    if regex.captures_len() < 3 {
                        return Err(ConfigError::MissingGroups(pattern));
                    }
                    Ok(KeyValueRule::new(name, regex))
                })
                .collect()
        };

        let key_value_rules = match self.key_value_rules {
            ListOverride::Default => ListOverride::Default,
            ListOverride::Replace(v) => ListOverride::Replace(compile(v)?),
            ListOverride::Extend(v) => ListOverride::Extend(compile(v)?),
        };

        let defaults = InferenceConfig::default();
        let min_table_columns = self.min_table_columns.unwrap_or(defaults.min_table_columns);
        let max_table_columns = self.max_table_columns.unwrap_or(defaults.max_table_columns);
        if min_table_columns > max_table_columns {
            return Err(ConfigError::EmptyColumnRange {
                min: min_table_columns,
                max: max_table_columns,
            });
        }

        let min_record_fields = self.min_record_fields.unwrap_or(defaults.min_record_fields);
        if min_record_fields < MIN_RECORD_FIELDS_FLOOR {
            return Err(ConfigError::TooFewRecordFields {
                got: min_record_fields,
                min: MIN_RECORD_FIELDS_FLOOR,
            });
        }

        Ok(InferenceConfig {
            key_value_rules,
            min_record_fields,
            min_table_columns,
            max_table_columns,
            max_entities_per_kind: self
                .max_entities_per_kind
                .unwrap_or(defaults.max_entities_per_kind),
            max_structured_records: self
                .max_structured_records
                .unwrap_or(defaults.max_structured_records),
            top_words: self.top_words.unwrap_or(defaults.top_words),
            min_word_length: self.min_word_length.unwrap_or(defaults.min_word_length),
        })
    }
}
