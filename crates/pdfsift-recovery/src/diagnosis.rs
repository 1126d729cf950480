use once_cell::sync::Lazy;
use regex::bytes::Regex;

use pdfsift_core::ProbableCause;

/// PDF readers accept the header anywhere in the first 1024 bytes.
const HEADER_WINDOW: usize = 1024;

/// Guess why a document produced no readable text.
///
/// Purely syntactic: nothing is decrypted or decoded.
pub fn diagnose(bytes: &[u8]) -> ProbableCause {
    static ENCRYPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)/Encrypt\b").unwrap());
    static IMAGE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?-u)/Subtype\s*/Image\b").unwrap());
    static TEXT_OP_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s-u)\bBT\b.*?\bET\b").unwrap());

    let window = &bytes[..bytes.len().min(HEADER_WINDOW)];
    if !window.windows(5).any(|w| w == b"%PDF-") {
        return ProbableCause::Corrupted;
    }
    if ENCRYPT_RE.is_match(bytes) {
        return ProbableCause::Encrypted;
    }
    if IMAGE_RE.is_match(bytes) && !TEXT_OP_RE.is_match(bytes) {
        return ProbableCause::ImageBased;
    }
    ProbableCause::Unknown
}
