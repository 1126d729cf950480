use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Local, SecondsFormat, Utc};

use pdfsift_core::{
    DocumentSummary, EntityRecord, ErrorRecord, FrequencyRecord, InferenceFault, PatternAnalysis,
    ProcessingStep, Record, RecordKind, RecordSequence, StructuredRecord,
};

use crate::config::InferenceConfig;
use crate::entities::{EntityScan, dedup_first_seen};
use crate::frequency;
use crate::stats::TextStats;
use crate::structure;

/// Turns recovered text into an ordered sequence of flat records.
///
/// Holds an [`InferenceConfig`]; every call is independent and keeps no
/// state between runs, so one inferencer can serve many documents.
pub struct RecordInferencer {
    config: InferenceConfig,
}

impl Default for RecordInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordInferencer {
    /// Create an inferencer with default configuration.
    pub fn new() -> Self {
        Self {
            config: InferenceConfig::default(),
        }
    }

    /// Create an inferencer with a custom configuration.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer records, stamping them with the current local time.
    ///
    /// Never fails: an internal fault yields a single `Error` record.
    pub fn infer_records(
        &self,
        text: &str,
        file_name: &str,
        file_size_bytes: u64,
    ) -> RecordSequence {
        self.infer_records_with_progress(text, file_name, file_size_bytes, &mut |_| {})
    }

    pub fn infer_records_with_progress(
        &self,
        text: &str,
        file_name: &str,
        file_size_bytes: u64,
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> RecordSequence {
        self.infer_records_at(text, file_name, file_size_bytes, Local::now(), progress)
    }

    /// Infer records as of `now`.
    pub fn infer_records_at(
        &self,
        text: &str,
        file_name: &str,
        file_size_bytes: u64,
        now: DateTime<Local>,
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> RecordSequence {
        let outcome = guarded(|| self.assemble(text, file_name, file_size_bytes, now, progress));
        match outcome {
            Ok(records) => records,
            Err(fault) => {
                tracing::warn!(file = file_name, error = %fault, "record inference failed");
                vec![error_record(&fault, file_name, now)]
            }
        }
    }

    fn assemble(
        &self,
        text: &str,
        file_name: &str,
        file_size_bytes: u64,
        now: DateTime<Local>,
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> RecordSequence {
        let config = &self.config;

        progress(ProcessingStep::AnalyzingStructure);
        let lines = structure::segment_lines(text);

        progress(ProcessingStep::IdentifyingPatterns);
        let structured = structure::infer_structure(&lines, config);

        progress(ProcessingStep::ExtractingStatistics);
        let scan = EntityScan::scan(text);
        let stats = TextStats::compute(text);

        let mut out: Vec<RecordKind> = Vec::new();

        out.push(RecordKind::DocumentSummary(DocumentSummary {
            file_name: file_name.to_string(),
            file_size_bytes,
            total_characters: stats.characters,
            total_words: stats.words,
            unique_words: stats.unique_words,
            sentences: stats.sentences,
            paragraphs: stats.paragraphs,
            processed_at: format_local_timestamp(now),
        }));

        out.push(RecordKind::PatternAnalysis(PatternAnalysis {
            emails: scan.emails.len(),
            phones: scan.phones.len(),
            dates: scan.dates.len(),
            currency_values: scan.currency_values.len(),
            urls: scan.urls.len(),
            postal_codes: scan.postal_codes.len(),
            structured_records: structured.len(),
            text_density: stats.text_density(),
        }));

        for (kind, values) in scan.listed() {
            let unique = dedup_first_seen(values, config.max_entities_per_kind());
            out.extend(unique.into_iter().enumerate().map(|(i, value)| {
                RecordKind::Entity(EntityRecord {
                    kind,
                    index: i + 1,
                    value: value.to_string(),
                    source: file_name.to_string(),
                })
            }));
        }

        let had_structure = !structured.is_empty();
        out.extend(
            structured
                .into_iter()
                .take(config.max_structured_records())
                .map(|fields| {
                    RecordKind::Structured(StructuredRecord {
                        fields,
                        source: file_name.to_string(),
                    })
                }),
        );

        if !had_structure {
            progress(ProcessingStep::WordFrequency);
            let ranked = frequency::top_words(
                text.split_whitespace(),
                config.min_word_length(),
                config.top_words(),
            );
            let total_words = stats.words.max(1) as f64;
            out.extend(ranked.into_iter().enumerate().map(|(i, wc)| {
                RecordKind::Frequency(FrequencyRecord {
                    rank: i + 1,
                    percentage: wc.count as f64 / total_words * 100.0,
                    word: wc.word,
                    frequency: wc.count,
                    source: file_name.to_string(),
                })
            }));
        }

        progress(ProcessingStep::Complete);
        tracing::debug!(file = file_name, records = out.len(), "record inference complete");
        out.into_iter().map(Record::from).collect()
    }
}

thread_local! {
    static IN_GUARDED: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is running inside a guarded inference call.
///
/// A panic hook can check this to keep recovered faults off stderr; the fault
/// is still reported as an `Error` record.
pub fn in_guarded_section() -> bool {
    IN_GUARDED.with(Cell::get)
}

/// Run `f`, converting a panic into an [`InferenceFault`].
pub(crate) fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, InferenceFault> {
    let outer = IN_GUARDED.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    IN_GUARDED.with(|flag| flag.set(outer));
    result.map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown error".to_string());
        InferenceFault::Panicked(message)
    })
}

fn error_record(fault: &InferenceFault, file_name: &str, now: DateTime<Local>) -> Record {
    let message = match fault {
        InferenceFault::Panicked(msg) => msg.clone(),
    };
    RecordKind::Error(ErrorRecord {
        message,
        file: file_name.to_string(),
        timestamp: now
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
    .into_record()
}

/// `3/7/2025, 2:05:09 PM`
fn format_local_timestamp(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
