use std::io::Write;

use owo_colors::OwoColorize;
use pdfsift_core::Record;
use pdfsift_core::record::size_in_kb;
use pdfsift_ingest::ProcessedDocument;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a short overview of what was recovered and inferred.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    doc: &ProcessedDocument,
    color: ColorMode,
) -> std::io::Result<()> {
    let words = doc.text.split_whitespace().count();
    let chars = doc.text.chars().count();
    let fields = doc.records.first().map_or(0, Record::len);

    if color.enabled() {
        writeln!(w, "{} {}", "Processed".green().bold(), doc.meta.name.bold())?;
    } else {
        writeln!(w, "Processed {}", doc.meta.name)?;
    }
    writeln!(w, "  File:    {} KB", size_in_kb(doc.meta.size_bytes))?;
    writeln!(w, "  Text:    {} words, {} chars", words, chars)?;
    writeln!(w, "  Records: {} records, {} fields", doc.records.len(), fields)?;

    let distribution = pdfsift_reporting::type_distribution(&doc.records);
    if !distribution.is_empty() {
        writeln!(w, "  Types:")?;
        let width = distribution
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, count) in &distribution {
            let pad = " ".repeat(width - label.chars().count());
            if color.enabled() {
                writeln!(w, "    {}{}  {}", paint_label(label), pad, count)?;
            } else {
                writeln!(w, "    {}{}  {}", label, pad, count)?;
            }
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Label of the record's category, as shown in the table heading.
fn record_label(record: &Record) -> Option<&str> {
    record
        .get("Data Type")
        .or_else(|| record.get("Analysis Type"))
        .or_else(|| record.get("Error"))
}

fn paint_label(label: &str) -> String {
    match label {
        "Email Address" => label.blue().to_string(),
        "Phone Number" => label.green().to_string(),
        "Date" => label.purple().to_string(),
        "Structured Data" => label.yellow().to_string(),
        "Document Summary" => label.cyan().to_string(),
        "Data Pattern Analysis" => label.magenta().to_string(),
        "Parse Error" => label.red().to_string(),
        _ => label.dimmed().to_string(),
    }
}

/// Print records as numbered blocks of aligned `key  value` lines.
///
/// `total` is the size of the unfiltered sequence, reported in the footer.
pub fn print_records(
    w: &mut dyn Write,
    records: &[&Record],
    total: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        let label = record_label(record).unwrap_or("Record");
        if color.enabled() {
            writeln!(w, "{} {}", format!("#{}", i + 1).bold(), paint_label(label))?;
        } else {
            writeln!(w, "#{} {}", i + 1, label)?;
        }

        let width = record.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (key, value) in record.iter() {
            if color.enabled() {
                let padded = format!("{:<width$}", key, width = width);
                writeln!(w, "  {}  {}", padded.dimmed(), value)?;
            } else {
                writeln!(w, "  {:<width$}  {}", key, value, width = width)?;
            }
        }
        writeln!(w)?;
    }

    let footer = format!("Showing {} of {} records", records.len(), total);
    if color.enabled() {
        writeln!(w, "{}", footer.dimmed())?;
    } else {
        writeln!(w, "{}", footer)?;
    }
    Ok(())
}

/// Print a "no matches" notice for an empty search result.
pub fn print_no_matches(w: &mut dyn Write, term: &str, color: ColorMode) -> std::io::Result<()> {
    let msg = format!("No data matches your search term \"{}\".", term);
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())
    } else {
        writeln!(w, "{}", msg)
    }
}
