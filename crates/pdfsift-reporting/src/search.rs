use pdfsift_core::Record;

/// Records with at least one value containing `term`, ignoring case.
///
/// An empty term keeps every record that has at least one field.
pub fn filter_records<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.values().any(|v| v.to_lowercase().contains(&needle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_values_not_keys() {
        let records = vec![
            Record::new().with("Name", "Alice"),
            Record::new().with("Alice", "Bob"),
        ];
        let hits = filter_records(&records, "ALI");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("Name"), Some("Alice"));
    }

    #[test]
    fn empty_term_keeps_non_empty_records() {
        let records = vec![Record::new().with("a", "b"), Record::new()];
        assert_eq!(filter_records(&records, "").len(), 1);
    }
}
