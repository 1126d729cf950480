use std::path::Path;

use thiserror::Error;

/// Largest file accepted by default (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("please select a valid PDF file: {name}")]
    NotPdf { name: String },
    #[error(
        "file size too large: {name} is {size_bytes} bytes, limit is {} MB",
        .max_bytes / 1024 / 1024
    )]
    TooLarge {
        name: String,
        size_bytes: u64,
        max_bytes: u64,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Megabytes to bytes, as used by the `max_file_size_mb` setting.
pub fn mb_to_bytes(mb: u64) -> u64 {
    mb.saturating_mul(1024 * 1024)
}

/// True when the name carries a `.pdf` extension, in any case.
pub fn is_pdf_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Check a file's name and size before any bytes are processed.
pub fn admit(name: &str, size_bytes: u64, max_bytes: u64) -> Result<(), AdmissionError> {
    if !is_pdf_name(name) {
        return Err(AdmissionError::NotPdf {
            name: name.to_string(),
        });
    }
    if size_bytes > max_bytes {
        return Err(AdmissionError::TooLarge {
            name: name.to_string(),
            size_bytes,
            max_bytes,
        });
    }
    Ok(())
}
