use once_cell::sync::Lazy;
use regex::Regex;

use pdfsift_core::Record;

use crate::config::InferenceConfig;
use crate::rules::{KeyValueRule, match_key_value};

/// Split text into trimmed, non-empty lines.
pub fn segment_lines(text: &str) -> Vec<&str> {
    static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r]+").unwrap());
    LINE_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split a line into table cells on runs of two or more whitespace characters
/// or on tabs. Returns `None` unless the cell count is within `columns`.
pub fn split_columns(
    line: &str,
    columns: &std::ops::RangeInclusive<usize>,
) -> Option<Vec<String>> {
    static CELL_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}|\t+").unwrap());
    let cells: Vec<String> = CELL_SEP_RE
        .split(line)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(String::from)
        .collect();
    columns.contains(&cells.len()).then_some(cells)
}

/// Accumulates key-value fields and numbers every emitted record.
///
/// Key-value and tabular records share one counter, so `Record ID`s are
/// unique and strictly increasing in emission order.
struct RecordBuffer {
    records: Vec<Record>,
    current: Record,
    next_id: usize,
    min_fields: usize,
}

impl RecordBuffer {
    fn new(min_fields: usize) -> Self {
        Self {
            records: Vec::new(),
            current: Record::new(),
            next_id: 0,
            min_fields,
        }
    }

    fn push(&mut self, mut record: Record) {
        self.next_id += 1;
        record.insert("Record ID", self.next_id.to_string());
        self.records.push(record);
    }

    /// Emit the in-progress record if it has enough fields.
    fn flush(&mut self) {
        if self.current.len() >= self.min_fields {
            let record = std::mem::take(&mut self.current);
            self.push(record);
        }
    }
}

/// Infer key-value and tabular records from lines, in line order.
///
/// A line that matches a key-value rule only feeds the in-progress record.
/// Any other line first flushes that record (when it has enough fields),
/// then may itself become a table row.
pub fn infer_structure(lines: &[&str], config: &InferenceConfig) -> Vec<Record> {
    let rules: Vec<KeyValueRule> = config.key_value_rules();
    let columns = config.table_columns();
    let mut buffer = RecordBuffer::new(config.min_record_fields());
    let mut tabular = 0usize;

    for line in lines {
        if let Some(kv) = match_key_value(line, &rules) {
            buffer.current.insert(kv.key, kv.value);
            continue;
        }

        buffer.flush();

        if let Some(cells) = split_columns(line, &columns) {
            let row: Record = cells
                .into_iter()
                .enumerate()
                .map(|(i, cell)| (format!("Column {}", i + 1), cell))
                .collect();
            buffer.push(row);
            tabular += 1;
        }
    }
    buffer.flush();

    tracing::debug!(
        lines = lines.len(),
        records = buffer.records.len(),
        tabular,
        "structure inference complete"
    );
    buffer.records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(text: &str) -> Vec<Record> {
        infer_structure(&segment_lines(text), &InferenceConfig::default())
    }

    #[test]
    fn segment_drops_blank_lines_and_trims() {
        assert_eq!(
            segment_lines("  a \r\n\r\n b\n\n\nc  "),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn key_value_block_becomes_one_record() {
        let records = infer("Name: Alice\nEmail: alice@example.com\nPhone: 555-123-4567");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec![
                ("Name", "Alice"),
                ("Email", "alice@example.com"),
                ("Phone", "555-123-4567"),
                ("Record ID", "1"),
            ]
        );
    }

    #[test]
    fn single_field_is_never_flushed() {
        assert!(infer("Name: Alice").is_empty());
    }

    #[test]
    fn non_matching_line_flushes_and_resets() {
        let records = infer("Name: Alice\nAge: 30\n!!!\nName: Bob\nAge: 41");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some("Alice"));
        assert_eq!(records[1].get("Name"), Some("Bob"));
        assert_eq!(records[1].get("Record ID"), Some("2"));
    }

    #[test]
    fn single_field_survives_unmatched_line() {
        // With only one field the record is not flushed, so it keeps growing.
        let records = infer("Name: Alice\n!!!\nAge: 30");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Name"), Some("Alice"));
        assert_eq!(records[0].get("Age"), Some("30"));
    }

    #[test]
    fn repeated_key_overwrites() {
        let records = infer("Name: Alice\nName: Carol\nCity: Oslo");
        assert_eq!(records[0].get("Name"), Some("Carol"));
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn table_row_columns() {
        let records = infer("1001  Widget  4  $9.99");
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec![
                ("Column 1", "1001"),
                ("Column 2", "Widget"),
                ("Column 3", "4"),
                ("Column 4", "$9.99"),
                ("Record ID", "1"),
            ]
        );
    }

    #[test]
    fn tab_separated_row() {
        let records = infer("2024\tQ1\t1,200");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Column 3"), Some("1,200"));
    }

    #[test]
    fn too_few_or_too_many_cells_are_not_rows() {
        assert!(infer("12  34").is_empty());
        assert!(infer("1  2  3  4  5  6  7  8  9").is_empty());
    }

    #[test]
    fn flush_precedes_table_row_on_same_line() {
        let records = infer("Name: Alice\nCity: Oslo\n10  20  30");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Record ID"), Some("1"));
        assert_eq!(records[0].get("Name"), Some("Alice"));
        assert_eq!(records[1].get("Record ID"), Some("2"));
        assert_eq!(records[1].get("Column 1"), Some("10"));
    }

    #[test]
    fn key_value_line_is_never_a_table_row() {
        // "Item  Qty  Price" also matches the whitespace rule, which wins.
        let records = infer("Item  Qty  Price");
        assert!(records.is_empty());
    }
}
