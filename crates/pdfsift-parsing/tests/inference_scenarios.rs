//! End-to-end behaviour of [`RecordInferencer`] over representative texts.

use std::collections::HashSet;

use pdfsift_core::Record;
use pdfsift_parsing::structure::{infer_structure, segment_lines};
use pdfsift_parsing::{InferenceConfig, RecordInferencer, infer_records};
use proptest::prelude::*;

fn of_type<'a>(records: &'a [Record], field: &str, value: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.get(field) == Some(value)).collect()
}

#[test]
fn contact_block_yields_one_structured_record_and_entities() {
    let text = "Name: Alice\nEmail: alice@example.com\nPhone: 555-123-4567";
    let records = infer_records(text, "contacts.pdf", 4096);

    assert_eq!(records.len(), 5);
    assert_eq!(records[1].get("Email Addresses"), Some("1"));
    assert_eq!(records[1].get("Phone Numbers"), Some("1"));
    assert_eq!(records[1].get("Structured Records"), Some("1"));

    assert_eq!(records[2].get("Data Type"), Some("Email Address"));
    assert_eq!(records[2].get("Value"), Some("alice@example.com"));
    assert_eq!(records[3].get("Data Type"), Some("Phone Number"));
    assert_eq!(records[3].get("Value"), Some("555-123-4567"));

    assert_eq!(
        records[4].iter().collect::<Vec<_>>(),
        vec![
            ("Name", "Alice"),
            ("Email", "alice@example.com"),
            ("Phone", "555-123-4567"),
            ("Record ID", "1"),
            ("Data Type", "Structured Data"),
            ("Source", "contacts.pdf"),
        ]
    );
    assert!(of_type(&records, "Analysis Type", "Word Frequency").is_empty());
}

#[test]
fn prose_falls_back_to_word_frequency() {
    let text = "The quick brown fox jumps over the lazy dog repeatedly.";
    let records = infer_records(text, "story.pdf", 100);

    assert_eq!(records[1].get("Structured Records"), Some("0"));
    let freq = of_type(&records, "Analysis Type", "Word Frequency");
    let words: Vec<_> = freq.iter().map(|r| r.get("Word").unwrap()).collect();
    assert_eq!(
        words,
        vec!["quick", "brown", "jumps", "over", "lazy", "repeatedly"]
    );
    assert_eq!(freq[0].get("Rank"), Some("1"));
    assert_eq!(freq[0].get("Frequency"), Some("1"));
    assert_eq!(freq[0].get("Percentage"), Some("10.00%"));
    assert_eq!(freq[0].get("Source"), Some("story.pdf"));
}

#[test]
fn repeated_words_rank_first() {
    let text = "report totals report figures report totals";
    let records = infer_records(text, "r.pdf", 0);
    let freq = of_type(&records, "Analysis Type", "Word Frequency");
    assert_eq!(freq[0].get("Word"), Some("report"));
    assert_eq!(freq[0].get("Frequency"), Some("3"));
    assert_eq!(freq[0].get("Percentage"), Some("50.00%"));
    assert_eq!(freq[1].get("Word"), Some("totals"));
    assert_eq!(freq[2].get("Word"), Some("figures"));
}

#[test]
fn duplicate_entities_are_listed_once_in_first_seen_order() {
    let text = "Dates: 01/02/2024 then 2024-05-06 then 01/02/2024 again";
    let records = infer_records(text, "d.pdf", 0);
    assert_eq!(records[1].get("Date Patterns"), Some("3"));
    let dates = of_type(&records, "Data Type", "Date");
    let values: Vec<_> = dates.iter().map(|r| r.get("Value").unwrap()).collect();
    assert_eq!(values, vec!["01/02/2024", "2024-05-06"]);
    let indices: Vec<_> = dates.iter().map(|r| r.get("Index").unwrap()).collect();
    assert_eq!(indices, vec!["1", "2"]);
}

#[test]
fn invoice_text_from_recovery_is_structured() {
    let pdf = b"%PDF-1.4\nBT (Invoice Number: 10042) Tj ET\n%%EOF";
    let text = pdfsift_recovery::recover_text(pdf).unwrap();
    let records = RecordInferencer::new().infer_records(&text, "invoice.pdf", pdf.len() as u64);
    assert_eq!(records[0].get("Analysis Type"), Some("Document Summary"));
    assert_eq!(records[0].get("File Size"), Some("0 KB"));
    assert_eq!(records[1].get("Analysis Type"), Some("Data Pattern Analysis"));
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{2,8}: [a-z0-9]{1,12}",
        "[A-Z][a-z]{2,8} = [0-9]{1,6}",
        "[0-9]{1,4}  [a-z]{1,6}  [0-9]{1,4}( +[a-z]{1,5}){0,3}",
        "[!?#]{1,5}",
        "[a-z]{1,10}",
    ]
}

proptest! {
    #[test]
    fn flushed_records_have_fields_and_increasing_ids(
        lines in proptest::collection::vec(line_strategy(), 0..40)
    ) {
        let text = lines.join("\n");
        let records = infer_structure(&segment_lines(&text), &InferenceConfig::default());
        for (i, record) in records.iter().enumerate() {
            // At least two inferred fields plus the Record ID.
            prop_assert!(record.len() >= 3);
            let expected = (i + 1).to_string();
            prop_assert_eq!(record.get("Record ID"), Some(expected.as_str()));
        }
    }

    #[test]
    fn frequency_and_structure_are_exclusive(
        lines in proptest::collection::vec(line_strategy(), 0..20)
    ) {
        let records = infer_records(&lines.join("\n"), "p.pdf", 0);
        let structured = of_type(&records, "Data Type", "Structured Data").len();
        let frequency = of_type(&records, "Analysis Type", "Word Frequency").len();
        prop_assert!(structured == 0 || frequency == 0);
        if records[1].get("Structured Records") != Some("0") {
            prop_assert_eq!(frequency, 0);
        }
    }

    #[test]
    fn leading_records_and_unique_entity_values(text in "[ -~\n]{0,300}") {
        let records = infer_records(&text, "p.pdf", 0);
        prop_assert_eq!(records[0].get("Analysis Type"), Some("Document Summary"));
        prop_assert_eq!(records[1].get("Analysis Type"), Some("Data Pattern Analysis"));
        for data_type in ["Email Address", "Phone Number", "Date"] {
            let block = of_type(&records, "Data Type", data_type);
            prop_assert!(block.len() <= 10);
            let unique: HashSet<_> = block.iter().map(|r| r.get("Value")).collect();
            prop_assert_eq!(unique.len(), block.len());
        }
    }
}
