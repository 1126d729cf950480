use std::fmt;

use thiserror::Error;

pub mod config_file;
pub mod record;

// Re-export for convenience
pub use record::{
    DocumentSummary, EntityKind, EntityRecord, ErrorRecord, FrequencyRecord, PatternAnalysis,
    Record, RecordKind, RecordSequence, StructuredRecord,
};

/// Minimum length of cleaned recovered text before extraction is considered failed.
pub const MIN_RECOVERED_TEXT_LEN: usize = 10;

/// Name and size of the document being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size_bytes: u64,
}

/// Raw PDF bytes plus their metadata, as handed over by the file-input layer.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub meta: FileMeta,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            bytes,
            meta: FileMeta {
                name: name.into(),
                size_bytes,
            },
        }
    }
}

/// Best guess at why a document yielded no readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbableCause {
    ImageBased,
    Encrypted,
    Corrupted,
    Unknown,
}

impl fmt::Display for ProbableCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::ImageBased => "likely image-based (image content but no text operators)",
            Self::Encrypted => "likely encrypted (document has an /Encrypt dictionary)",
            Self::Corrupted => "likely corrupted (missing %PDF- header)",
            Self::Unknown => "likely image-based, encrypted, or corrupted",
        };
        f.write_str(msg)
    }
}

/// Raised by text recovery when too little readable text survives cleanup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("no readable text ({recovered_len} characters recovered): {cause}")]
    NoReadableText {
        recovered_len: usize,
        cause: ProbableCause,
    },
}

impl ExtractionFailure {
    pub fn cause(&self) -> ProbableCause {
        match self {
            Self::NoReadableText { cause, .. } => *cause,
        }
    }
}

/// An unexpected fault inside record inference.
///
/// Never escapes the inferencer: it is converted into a single error record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceFault {
    #[error("inference panicked: {0}")]
    Panicked(String),
}

/// Trait for text recovery backends.
///
/// Implementors turn raw document bytes into plain text; record inference
/// lives in `pdfsift-parsing`.
pub trait TextBackend: Send + Sync {
    /// Recover readable text from the full byte content of a PDF.
    fn recover_text(&self, bytes: &[u8]) -> Result<String, ExtractionFailure>;

    /// Like [`recover_text`](Self::recover_text), reporting stages to `progress`.
    ///
    /// The default implementation reports nothing.
    fn recover_text_with_progress(
        &self,
        bytes: &[u8],
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> Result<String, ExtractionFailure> {
        let _ = progress;
        self.recover_text(bytes)
    }
}

/// Pipeline stage notifications for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStep {
    Reading,
    ParsingContent,
    ExtractingStreams,
    CleaningText,
    TextComplete,
    AnalyzingStructure,
    IdentifyingPatterns,
    ExtractingStatistics,
    WordFrequency,
    Complete,
}

impl ProcessingStep {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Reading => "Reading PDF file...",
            Self::ParsingContent => "Parsing PDF content...",
            Self::ExtractingStreams => "Extracting from data streams...",
            Self::CleaningText => "Cleaning and formatting text...",
            Self::TextComplete => "Text extraction completed!",
            Self::AnalyzingStructure => "Analyzing document structure...",
            Self::IdentifyingPatterns => "Identifying data patterns...",
            Self::ExtractingStatistics => "Extracting metadata and statistics...",
            Self::WordFrequency => "Generating word frequency analysis...",
            Self::Complete => "Data analysis completed!",
        }
    }
}

impl fmt::Display for ProcessingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
