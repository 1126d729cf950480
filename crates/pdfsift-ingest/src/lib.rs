use std::path::Path;

use thiserror::Error;

use pdfsift_core::{
    ExtractionFailure, FileMeta, ProcessingStep, RawDocument, RecordSequence, TextBackend,
};
use pdfsift_parsing::RecordInferencer;

pub mod admission;

pub use admission::{AdmissionError, DEFAULT_MAX_FILE_SIZE, admit, is_pdf_name, mb_to_bytes};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),
}

/// Recovered text and inferred records for one document.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub meta: FileMeta,
    pub text: String,
    pub records: RecordSequence,
}

/// Admit and read a PDF from disk.
pub fn load_document(path: &Path, max_bytes: u64) -> Result<RawDocument, AdmissionError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let size = std::fs::metadata(path)?.len();
    admit(&name, size, max_bytes)?;

    let bytes = std::fs::read(path)?;
    tracing::debug!(file = %name, bytes = bytes.len(), "loaded document");
    Ok(RawDocument::new(name, bytes))
}

/// Run text recovery and record inference over an admitted document.
pub fn process_document(
    doc: &RawDocument,
    backend: &dyn TextBackend,
    inferencer: &RecordInferencer,
    progress: &mut dyn FnMut(ProcessingStep),
) -> Result<ProcessedDocument, ExtractionFailure> {
    let text = backend.recover_text_with_progress(&doc.bytes, progress)?;
    let records = inferencer.infer_records_with_progress(
        &text,
        &doc.meta.name,
        doc.meta.size_bytes,
        progress,
    );
    Ok(ProcessedDocument {
        meta: doc.meta.clone(),
        text,
        records,
    })
}

/// Load a PDF from `path` and run the whole pipeline.
///
/// Pipeline:
/// 1. Check the extension and size against `max_bytes`
/// 2. Read the file
/// 3. Recover text via `backend`
/// 4. Infer records
pub fn process_path(
    path: &Path,
    max_bytes: u64,
    backend: &dyn TextBackend,
    inferencer: &RecordInferencer,
    progress: &mut dyn FnMut(ProcessingStep),
) -> Result<ProcessedDocument, IngestError> {
    progress(ProcessingStep::Reading);
    let doc = load_document(path, max_bytes)?;
    Ok(process_document(&doc, backend, inferencer, progress)?)
}
