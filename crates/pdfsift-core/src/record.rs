use serde::ser::{Serialize, SerializeMap, Serializer};

/// A flat, ordered mapping from field name to string value.
///
/// Field order is insertion order. Inserting a key that already exists
/// replaces the value but keeps the key at its original position, so a
/// record built up over several passes renders its columns in the order
/// they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

/// The output of one inference run.
pub type RecordSequence = Vec<Record>;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.fields.push((key, value));
        None
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Entity categories recognized anywhere in the recovered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Email,
    Phone,
    Date,
    Currency,
    Number,
    Url,
    PostalCode,
}

impl EntityKind {
    /// Value of the `Data Type` field for per-entity records.
    pub fn data_type_label(&self) -> &'static str {
        match self {
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Date => "Date",
            Self::Currency => "Currency Value",
            Self::Number => "Number",
            Self::Url => "URL",
            Self::PostalCode => "Zip Code",
        }
    }
}

/// Whole-document statistics, always the first record of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub file_name: String,
    pub file_size_bytes: u64,
    pub total_characters: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub processed_at: String,
}

/// Entity and structure counts, always the second record of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternAnalysis {
    pub emails: usize,
    pub phones: usize,
    pub dates: usize,
    pub currency_values: usize,
    pub urls: usize,
    pub postal_codes: usize,
    pub structured_records: usize,
    /// Words per paragraph, rounded.
    pub text_density: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    /// 1-based position within its kind.
    pub index: usize,
    pub value: String,
    pub source: String,
}

/// A key-value or tabular record inferred from the text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRecord {
    pub fields: Record,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRecord {
    pub rank: usize,
    pub word: String,
    pub frequency: usize,
    /// Share of all words, in percent.
    pub percentage: f64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
    pub file: String,
    pub timestamp: String,
}

/// Typed view of every record shape the inferencer emits.
///
/// Converted to a flat [`Record`] at the output boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    DocumentSummary(DocumentSummary),
    PatternAnalysis(PatternAnalysis),
    Entity(EntityRecord),
    Structured(StructuredRecord),
    Frequency(FrequencyRecord),
    Error(ErrorRecord),
}

impl RecordKind {
    pub fn into_record(self) -> Record {
        match self {
            Self::DocumentSummary(s) => Record::new()
                .with("Analysis Type", "Document Summary")
                .with("File Name", s.file_name)
                .with("File Size", format!("{} KB", size_in_kb(s.file_size_bytes)))
                .with("Total Characters", s.total_characters.to_string())
                .with("Total Words", s.total_words.to_string())
                .with("Unique Words", s.unique_words.to_string())
                .with("Sentences", s.sentences.to_string())
                .with("Paragraphs", s.paragraphs.to_string())
                .with("Processing Date", s.processed_at),
            Self::PatternAnalysis(p) => Record::new()
                .with("Analysis Type", "Data Pattern Analysis")
                .with("Email Addresses", p.emails.to_string())
                .with("Phone Numbers", p.phones.to_string())
                .with("Date Patterns", p.dates.to_string())
                .with("Currency Values", p.currency_values.to_string())
                .with("URLs Found", p.urls.to_string())
                .with("Zip Codes", p.postal_codes.to_string())
                .with("Structured Records", p.structured_records.to_string())
                .with("Text Density", format!("{} words/paragraph", p.text_density)),
            Self::Entity(e) => Record::new()
                .with("Data Type", e.kind.data_type_label())
                .with("Index", e.index.to_string())
                .with("Value", e.value)
                .with("Context", "Found in document")
                .with("Verification", "Pattern Match")
                .with("Source", e.source),
            Self::Structured(s) => s
                .fields
                .with("Data Type", "Structured Data")
                .with("Source", s.source),
            Self::Frequency(f) => Record::new()
                .with("Analysis Type", "Word Frequency")
                .with("Rank", f.rank.to_string())
                .with("Word", f.word)
                .with("Frequency", f.frequency.to_string())
                .with("Percentage", format!("{}%", format_fixed_2(f.percentage)))
                .with("Source", f.source),
            Self::Error(e) => Record::new()
                .with("Error", "Parse Error")
                .with("Message", e.message)
                .with("File", e.file)
                .with("Timestamp", e.timestamp),
        }
    }
}

impl From<RecordKind> for Record {
    fn from(kind: RecordKind) -> Self {
        kind.into_record()
    }
}

/// File size in whole kilobytes, rounded half up.
pub fn size_in_kb(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}

/// Format with two decimals, rounding exact halves up (`3.125` -> `3.13`).
pub fn format_fixed_2(value: f64) -> String {
    let scaled = (value * 100.0).round() / 100.0;
    format!("{:.2}", scaled)
}
