use pdfsift_core::Record;

/// Group label used when a record carries neither `Data Type` nor `Analysis Type`.
pub const OTHER_TYPE: &str = "Other";

/// Record counts grouped by `Data Type`, falling back to `Analysis Type`, then
/// [`OTHER_TYPE`]. Groups appear in the order they are first seen.
pub fn type_distribution(records: &[Record]) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    for record in records {
        let label = [record.get("Data Type"), record.get("Analysis Type")]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .unwrap_or(OTHER_TYPE);
        match groups.iter_mut().find(|(name, _)| name.as_str() == label) {
            Some((_, count)) => *count += 1,
            None => groups.push((label.to_string(), 1)),
        }
    }
    groups
}
