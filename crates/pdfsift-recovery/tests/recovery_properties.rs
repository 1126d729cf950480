//! Behavioural tests for raw-byte text recovery.
//!
//! The fixture below is a hand-written, uncompressed single-page PDF of the
//! kind simple report generators emit.

use pdfsift_core::{ExtractionFailure, ProbableCause, TextBackend};
use pdfsift_recovery::{RawByteBackend, recover_text};
use proptest::prelude::*;

const INVOICE_PDF: &str = "%PDF-1.4
1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj
2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj
3 0 obj << /Type /Page /Parent 2 0 R /Contents 4 0 R >> endobj
4 0 obj << /Length 120 >>
stream
BT
/F1 12 Tf
72 720 Td
(Invoice Number: 10042) Tj
0 -14 Td
[(Total Due: ) -120 ($1,250.00)] TJ
ET
endstream
endobj
5 0 obj << /Title (Monthly Invoice) /Producer (ReportGen 2.1) >> endobj
trailer << /Root 1 0 R >>
%%EOF
";

#[test]
fn recovers_show_text_and_metadata_strings() {
    let text = recover_text(INVOICE_PDF.as_bytes()).unwrap();
    assert!(text.contains("Invoice Number: 10042"));
    assert!(text.contains("Total Due: $1,250.00"));
    assert!(text.contains("Monthly Invoice"));
    assert!(text.contains("ReportGen 2.1"));
    assert!(!text.contains('\n'));
}

#[test]
fn passes_appear_in_fixed_order() {
    let text = recover_text(INVOICE_PDF.as_bytes()).unwrap();
    // Pass 1 output starts the text, pass 3 repeats the same literal later.
    assert!(text.starts_with("Invoice Number: 10042 Total Due:"));
    let first = text.find("Invoice Number: 10042").unwrap();
    let last = text.rfind("Invoice Number: 10042").unwrap();
    assert!(last > first);
}

#[test]
fn image_only_document_fails_with_image_cause() {
    let pdf = b"%PDF-1.4\n1 0 obj << /Type /XObject /Subtype /Image /Filter /DCTDecode >>\nstream\n\xff\xd8\xff\xe0\x00\x10\nendstream\nendobj\n%%EOF";
    let err = RawByteBackend::default().recover_text(pdf).unwrap_err();
    assert_eq!(err.cause(), ProbableCause::ImageBased);
}

#[test]
fn encrypted_document_fails_with_encrypted_cause() {
    let pdf = b"%PDF-1.6\ntrailer << /Encrypt 9 0 R /Root 1 0 R >>\n%%EOF";
    let err = recover_text(pdf).unwrap_err();
    assert!(matches!(
        err,
        ExtractionFailure::NoReadableText {
            cause: ProbableCause::Encrypted,
            ..
        }
    ));
}

proptest! {
    #[test]
    fn output_is_printable_ascii(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(text) = recover_text(&bytes) {
            prop_assert!(text
                .chars()
                .all(|c| matches!(c, '\n' | '\r' | '\t' | ' '..='~')));
        }
    }

    #[test]
    fn fails_iff_shorter_than_threshold(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        match recover_text(&bytes) {
            Ok(text) => prop_assert!(text.chars().count() >= 10),
            Err(ExtractionFailure::NoReadableText { recovered_len, .. }) => {
                prop_assert!(recovered_len < 10)
            }
        }
    }

    #[test]
    fn show_text_is_recovered(
        prefix in proptest::collection::vec(any::<u8>(), 0..64),
        body in "[a-z0-9]{4,10}( [a-z0-9]{1,10}){1,4}",
    ) {
        let mut pdf = prefix;
        pdf.extend_from_slice(format!("\nBT ({body}) Tj ET\n").as_bytes());
        let text = recover_text(&pdf).unwrap();
        prop_assert!(text.contains(&body));
    }
}
