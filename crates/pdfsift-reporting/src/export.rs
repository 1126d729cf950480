use pdfsift_core::Record;

/// Wrap a value in double quotes, doubling any embedded quote.
fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// CSV with a header row taken from the first record's keys.
///
/// Every value is quoted; fields a record lacks are written as `""`.
/// Rows are joined by `\n` with no trailing newline. An empty sequence
/// exports as an empty string.
pub fn export_csv(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));
    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| csv_quote(record.get(h).unwrap_or("")))
            .collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Pretty JSON array of objects, two-space indented, field order preserved.
pub fn export_json(records: &[Record]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// One block per record: a `#n` heading followed by aligned `key: value` lines.
pub fn export_text(records: &[Record]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("#{}\n", i + 1));
        let width = record.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (key, value) in record.iter() {
            out.push_str(&format!("  {:<width$}  {}\n", key, value, width = width));
        }
    }
    out
}

/// Parse CSV text into rows of fields.
///
/// Handles quoted fields with `""` escapes and embedded commas or newlines.
/// Rows are separated by `\n` (a preceding `\r` is dropped).
pub fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
