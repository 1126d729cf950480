//! Structured record inference over recovered PDF text.
//!
//! Pipeline:
//! 1. Split the text into trimmed, non-empty lines
//! 2. Accumulate key-value fields into records and pick out table rows
//! 3. Scan the whole text for emails, phones, dates and other entities
//! 4. Compute document statistics
//! 5. Assemble the output: summary, pattern analysis, entities, structured
//!    records, and word frequencies when no structure was found

pub mod config;
pub mod entities;
pub mod frequency;
pub mod inferencer;
pub mod rules;
pub mod stats;
pub mod structure;

pub use config::{ConfigError, InferenceConfig, InferenceConfigBuilder, ListOverride};
pub use inferencer::{RecordInferencer, in_guarded_section};
pub use rules::{KeyValue, KeyValueRule};
pub use stats::TextStats;

use pdfsift_core::RecordSequence;

/// Infer records from recovered text with the default configuration.
pub fn infer_records(text: &str, file_name: &str, file_size_bytes: u64) -> RecordSequence {
    RecordInferencer::new().infer_records(text, file_name, file_size_bytes)
}
