use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use pdfsift_core::Record;

pub mod analytics;
pub mod export;
pub mod search;

pub use analytics::type_distribution;
pub use export::{export_csv, export_json, export_text, parse_csv};
pub use search::filter_records;

/// File stem used when the input name yields nothing.
pub const DEFAULT_STEM: &str = "extracted_data";

/// File formats a record sequence can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Text => "Plain Text",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no records to export")]
    NoRecords,
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render records in `format`.
pub fn render(records: &[Record], format: ExportFormat) -> Result<String, ExportError> {
    Ok(match format {
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Json => export_json(records)?,
        ExportFormat::Text => export_text(records),
    })
}

/// Write records to `path`. An empty sequence is not written.
pub fn export_records(
    records: &[Record],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }
    let content = render(records, format)?;
    std::fs::write(path, content)?;
    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        format = format.label(),
        "exported records"
    );
    Ok(())
}

/// Output file stem: the input name with its first `.pdf` removed.
pub fn output_stem(file_name: &str) -> String {
    let stem = file_name.replacen(".pdf", "", 1);
    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem
    }
}

/// `<stem>.<ext>` next to the current directory.
pub fn default_output_path(file_name: &str, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!("{}.{}", output_stem(file_name), format.extension()))
}
