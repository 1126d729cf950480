pub mod diagnosis;
pub mod heuristics;
pub mod text;

use pdfsift_core::{ExtractionFailure, MIN_RECOVERED_TEXT_LEN, ProcessingStep, TextBackend};

pub use diagnosis::diagnose;

/// Output of the three recovery passes before they are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicPasses {
    pub text_objects: String,
    pub streams: String,
    pub bare_strings: String,
}

impl HeuristicPasses {
    /// Join the passes in fixed order and clean the result.
    ///
    /// Fragments found by more than one pass are kept as duplicates.
    pub fn merge(&self) -> String {
        let joined = [
            self.text_objects.as_str(),
            self.streams.as_str(),
            self.bare_strings.as_str(),
        ]
        .join(" ");
        text::clean_recovered(&joined)
    }
}

/// Raw-byte implementation of [`TextBackend`].
///
/// Reads text straight out of PDF syntax (show-text operators, readable
/// stream fragments, literal strings) without decompressing anything.
pub struct RawByteBackend {
    /// Cleaned text shorter than this is an [`ExtractionFailure`].
    min_text_length: usize,
}

impl Default for RawByteBackend {
    fn default() -> Self {
        Self {
            min_text_length: MIN_RECOVERED_TEXT_LEN,
        }
    }
}

impl RawByteBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum accepted length of recovered text.
    pub fn with_min_text_length(mut self, len: usize) -> Self {
        self.min_text_length = len;
        self
    }

    pub fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    /// Run the three passes over the raw bytes.
    pub fn run_passes(
        &self,
        bytes: &[u8],
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> HeuristicPasses {
        let content = text::decode_latin1(bytes);

        progress(ProcessingStep::ParsingContent);
        let text_objects = heuristics::text_show_blocks(&content);
        tracing::debug!(chars = text_objects.len(), "text-show pass");

        progress(ProcessingStep::ExtractingStreams);
        let streams = heuristics::stream_bodies(&content);
        tracing::debug!(chars = streams.len(), "stream pass");

        progress(ProcessingStep::CleaningText);
        let bare_strings = heuristics::bare_strings(&content);
        tracing::debug!(chars = bare_strings.len(), "bare string pass");

        HeuristicPasses {
            text_objects,
            streams,
            bare_strings,
        }
    }

    /// Recover text, reporting each stage to `progress`.
    pub fn recover_with_progress(
        &self,
        bytes: &[u8],
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> Result<String, ExtractionFailure> {
        let recovered = self.run_passes(bytes, progress).merge();
        let recovered_len = recovered.chars().count();

        if recovered_len < self.min_text_length {
            let cause = diagnose(bytes);
            tracing::warn!(recovered_len, ?cause, "no readable text recovered");
            return Err(ExtractionFailure::NoReadableText {
                recovered_len,
                cause,
            });
        }

        progress(ProcessingStep::TextComplete);
        tracing::debug!(recovered_len, "text recovery complete");
        Ok(recovered)
    }
}

impl TextBackend for RawByteBackend {
    fn recover_text(&self, bytes: &[u8]) -> Result<String, ExtractionFailure> {
        self.recover_with_progress(bytes, &mut |_| {})
    }

    fn recover_text_with_progress(
        &self,
        bytes: &[u8],
        progress: &mut dyn FnMut(ProcessingStep),
    ) -> Result<String, ExtractionFailure> {
        self.recover_with_progress(bytes, progress)
    }
}

/// Recover text from PDF bytes with the default backend.
pub fn recover_text(bytes: &[u8]) -> Result<String, ExtractionFailure> {
    RawByteBackend::default().recover_text(bytes)
}
